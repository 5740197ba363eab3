use leptos::*;
use leptos_router::*;

use vm_boundary::Visa;
use vm_core::{
    fetch::Fetch,
    query::{LATEST_LIMIT, NEWEST_FIRST},
};
use vm_frontend_api::VisaQuery;

use crate::{
    components::{FetchView, VisaCard},
    fetch,
    pages::Page,
    AppState,
};

#[component]
pub fn Home(app: AppState) -> impl IntoView {
    let latest = RwSignal::new(Fetch::<Vec<Visa>>::default());

    let query = VisaQuery {
        limit: Some(LATEST_LIMIT),
        sort: Some(NEWEST_FIRST.to_owned()),
        ..Default::default()
    };
    let request = {
        let query = query.clone();
        move || {
            let query = query.clone();
            async move { app.public_api.visas(&query).await }
        }
    };

    fetch::load(latest, request());

    let on_retry = Callback::new(move |()| fetch::retry(latest, request.clone()));

    view! {
      <section class="bg-blue-600 text-white">
        <div class="container mx-auto px-6 py-20 text-center">
          <h1 class="text-4xl md:text-5xl font-bold mb-4">"Your visa, without the paperwork maze"</h1>
          <p class="text-lg mb-8 opacity-90">
            "Compare visa requirements by country, apply online and track every application in one place."
          </p>
          <A
            href=Page::AllVisas.path()
            class="inline-block px-6 py-3 rounded-lg font-semibold bg-white text-blue-700 hover:bg-gray-100".to_string()
          >
            "Explore visas"
          </A>
        </div>
      </section>
      <section class="container mx-auto px-6 py-12">
        <h2 class="text-3xl font-bold mb-8 text-center">"Latest Visas"</h2>
        <FetchView
          state = latest
          on_retry
          ready = move |visas: Vec<Visa>| {
            if visas.is_empty() {
              return view! { <p class="text-center text-gray-500">"No visas available yet."</p> }.into_view();
            }
            view! {
              <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                {visas.into_iter().map(|visa| view! { <VisaCard visa /> }).collect_view()}
              </div>
            }
            .into_view()
          }
        />
        <div class="mt-8 text-center">
          <A href=Page::AllVisas.path() class="text-blue-600 hover:underline".to_string()>"See all visas"</A>
        </div>
      </section>
    }
}
