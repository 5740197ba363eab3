use leptos::*;
use leptos_router::*;

use vm_boundary::{User, Visa};
use vm_core::{fetch::Fetch, form::ApplyDialog, gate::login_redirect};

use crate::{
    components::{format_fee, format_months, ApplyModal, FetchView},
    fetch, AppState,
};

#[component]
pub fn VisaDetails(app: AppState) -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let visa = RwSignal::new(Fetch::<Visa>::default());

    let request = move || {
        let id = id.get_untracked();
        async move { app.public_api.visa(&id).await }
    };

    Effect::new(move |_| {
        id.track();
        fetch::load_optional(visa, request());
    });

    let on_retry = Callback::new(move |()| fetch::retry_optional(visa, request));

    view! {
      <section class="container mx-auto px-6 py-12">
        <FetchView
          state = visa
          on_retry
          not_found = "Visa not found"
          ready = move |visa: Visa| view! { <VisaInfo app visa /> }
        />
      </section>
    }
}

#[component]
fn VisaInfo(app: AppState, visa: Visa) -> impl IntoView {
    let user = create_memo(move |_| app.session().map(|s| s.user));
    let location = use_location();
    let navigate = use_navigate();

    let Visa {
        country_name,
        country_image,
        visa_type,
        processing_time,
        fee,
        validity,
        application_method,
        age_restriction,
        description,
        required_documents,
        added_by,
        ..
    } = visa.clone();

    let on_sign_in = move |_| {
        let url = login_redirect(&location.pathname.get_untracked());
        navigate(&url, NavigateOptions::default());
    };

    let apply = move || match user.get() {
        Some(user) => view! { <ApplyButton app visa = visa.clone() user /> }.into_view(),
        None => view! {
          <button
            class="px-6 py-3 rounded-lg font-semibold text-white bg-blue-600 hover:bg-blue-700"
            on:click = on_sign_in.clone()
          >
            "Sign in to apply"
          </button>
        }
        .into_view(),
    };

    view! {
      <div class="max-w-4xl mx-auto rounded-xl shadow-md overflow-hidden bg-white dark:bg-gray-800">
        <img src=country_image alt=country_name.clone() class="w-full h-72 object-cover" />
        <div class="p-8">
          <div class="flex flex-wrap justify-between items-center gap-4 mb-6">
            <h1 class="text-3xl font-bold">{ country_name }</h1>
            <span class="px-3 py-1 rounded bg-blue-600 text-white text-sm font-semibold">
              { visa_type.as_str() }
            </span>
          </div>
          <dl class="grid sm:grid-cols-2 gap-4 mb-6 text-sm">
            <Detail label="Processing time" value=processing_time />
            <Detail label="Fee" value=format_fee(fee) />
            <Detail label="Validity" value=format_months(validity) />
            <Detail label="Application method" value=application_method.to_string() />
            <Detail
              label="Age restriction"
              value=age_restriction.map_or_else(|| "None".to_string(), |age| format!("{age}+"))
            />
            <Detail label="Added by" value=added_by />
          </dl>
          <h2 class="text-xl font-semibold mb-2">"Description"</h2>
          <p class="mb-6 whitespace-pre-line">{ description }</p>
          <h2 class="text-xl font-semibold mb-2">"Required documents"</h2>
          <ul class="mb-8 ml-5 list-disc">
            {required_documents
                .into_iter()
                .map(|doc| view! { <li>{ doc }</li> })
                .collect_view()}
          </ul>
          { apply }
        </div>
      </div>
    }
}

#[component]
fn ApplyButton(app: AppState, visa: Visa, user: User) -> impl IntoView {
    let dialog = RwSignal::new(ApplyDialog::new(visa, &user));
    view! {
      <button
        class="px-6 py-3 rounded-lg font-semibold text-white bg-blue-600 hover:bg-blue-700"
        on:click = move |_| dialog.update(ApplyDialog::open)
      >
        "Apply for the visa"
      </button>
      <ApplyModal app dialog />
    }
}

#[component]
fn Detail(label: &'static str, value: String) -> impl IntoView {
    view! {
      <div>
        <dt class="text-gray-500">{ label }</dt>
        <dd class="font-medium">{ value }</dd>
      </div>
    }
}
