use leptos::*;
use leptos_router::*;

use vm_boundary::Visa;

use crate::pages::Page;

/// Summary of a listing with a link to its details.
///
/// Children are rendered as additional actions.
#[component]
pub fn VisaCard(visa: Visa, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let Visa {
        id,
        country_name,
        country_image,
        visa_type,
        processing_time,
        fee,
        validity,
        application_method,
        age_restriction,
        required_documents,
        ..
    } = visa;

    view! {
      <div class="flex flex-col rounded-xl shadow-md overflow-hidden bg-white dark:bg-gray-800">
        <div class="relative h-48">
          <img src=country_image alt=country_name.clone() class="w-full h-full object-cover" />
          <span class="absolute top-3 right-3 px-2 py-1 rounded text-xs font-semibold bg-blue-600 text-white">
            { visa_type.as_str() }
          </span>
        </div>
        <div class="flex flex-col flex-1 p-5">
          <div class="flex justify-between items-center mb-3">
            <h3 class="text-xl font-bold">{ country_name }</h3>
            {age_restriction.map(|age| view! {
              <span class="text-xs text-gray-500">{ format!("Age {age}+") }</span>
            })}
          </div>
          <ul class="space-y-1 text-sm text-gray-600 dark:text-gray-300 mb-3">
            <li>"Processing: " { processing_time }</li>
            <li>"Fee: " { format_fee(fee) }</li>
            <li>"Validity: " { format_months(validity) }</li>
            <li>"Method: " { application_method.as_str() }</li>
          </ul>
          <details class="text-sm mb-4">
            <summary class="cursor-pointer">
              { format!("Required documents ({})", required_documents.len()) }
            </summary>
            <ul class="ml-5 mt-1 list-disc">
              {required_documents
                  .into_iter()
                  .map(|doc| view! { <li>{ doc }</li> })
                  .collect_view()}
            </ul>
          </details>
          <div class="mt-auto flex gap-2">
            <A
              href=Page::visa_details(&id)
              class="flex-1 text-center px-4 py-2 rounded-lg text-white bg-blue-600 hover:bg-blue-700"
            >
              "See Details"
            </A>
            {children.map(|c| c())}
          </div>
        </div>
      </div>
    }
}

#[must_use]
pub fn format_fee(fee: f64) -> String {
    format!("${fee:.2}")
}

#[must_use]
pub fn format_months(months: u32) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{months} months")
    }
}
