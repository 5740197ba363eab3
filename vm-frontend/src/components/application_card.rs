use leptos::*;

use vm_boundary::{ApplicationStatus, VisaApplication};

use super::format_fee;

#[component]
pub fn ApplicationCard(application: VisaApplication) -> impl IntoView {
    let VisaApplication {
        visa_info,
        first_name,
        last_name,
        email,
        passport_number,
        passport_expiry,
        fee,
        status,
        applied_date,
        ..
    } = application;

    let applied = applied_date
        .date()
        .format(&time::format_description::well_known::Iso8601::DATE)
        .unwrap_or_default();

    view! {
      <div class="rounded-xl shadow-md overflow-hidden bg-white dark:bg-gray-800">
        <div class="relative h-36">
          <img src=visa_info.country_image alt=visa_info.country_name.clone() class="w-full h-full object-cover" />
          <span class=status_class(status)>{ status.as_str() }</span>
        </div>
        <div class="p-5 space-y-2 text-sm">
          <h3 class="text-lg font-bold">
            { format!("{} - {}", visa_info.country_name, visa_info.visa_type) }
          </h3>
          <p>"Applicant: " { format!("{first_name} {last_name}") }</p>
          <p>"Email: " { email }</p>
          <p>"Passport: " { passport_number } " (valid until " { passport_expiry } ")"</p>
          <p>"Processing: " { visa_info.processing_time }</p>
          <p>"Method: " { visa_info.application_method.as_str() }</p>
          <p>"Fee: " { format_fee(fee) }</p>
          <p class="text-gray-500">"Applied on " { applied }</p>
        </div>
      </div>
    }
}

const fn status_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "absolute top-3 right-3 px-2 py-1 rounded text-xs font-semibold capitalize bg-yellow-100 text-yellow-800",
        ApplicationStatus::Approved => "absolute top-3 right-3 px-2 py-1 rounded text-xs font-semibold capitalize bg-green-100 text-green-800",
        ApplicationStatus::Rejected => "absolute top-3 right-3 px-2 py-1 rounded text-xs font-semibold capitalize bg-red-100 text-red-800",
        ApplicationStatus::Processing => "absolute top-3 right-3 px-2 py-1 rounded text-xs font-semibold capitalize bg-blue-100 text-blue-800",
    }
}
