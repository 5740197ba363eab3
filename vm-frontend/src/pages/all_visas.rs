use leptos::*;

use vm_boundary::{Visa, VisaType};
use vm_core::{
    fetch::Fetch,
    query::{SortOrder, VisaFilter},
};
use vm_frontend_api::VisaQuery;

use crate::{
    components::{FetchView, VisaCard},
    fetch, AppState,
};

const CONTROL_CLASS: &str = "px-3 py-2 rounded-lg border border-gray-300 bg-gray-50 text-gray-900 dark:bg-gray-700 dark:border-gray-600 dark:text-white";

#[component]
pub fn AllVisas(app: AppState) -> impl IntoView {
    // -- signals -- //

    let filter = RwSignal::new(VisaFilter::default());
    let visas = RwSignal::new(Fetch::<Vec<Visa>>::default());

    let request = move || {
        let query = filter.with_untracked(to_query);
        async move { app.public_api.visas(&query).await }
    };

    // -- effects -- //

    Effect::new(move |_| {
        filter.track();
        fetch::load(visas, request());
    });

    // -- callbacks -- //

    let on_retry = Callback::new(move |()| fetch::retry(visas, request));
    let on_reset = move |_| filter.set(VisaFilter::default());

    let on_search = move |ev: ev::Event| {
        let search = event_target_value(&ev);
        filter.update(|f| f.search = search);
    };
    let on_visa_type = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        filter.update(|f| f.visa_type = value.parse::<VisaType>().ok());
    };
    let on_sort = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        filter.update(|f| f.sort = value.parse().unwrap_or_default());
    };

    view! {
      <section class="container mx-auto px-6 py-12">
        <h1 class="text-3xl font-bold mb-8 text-center">"All Visas"</h1>
        <div class="flex flex-col md:flex-row gap-4 mb-8">
          <input
            type="search"
            placeholder="Search by country"
            class=format!("flex-1 {CONTROL_CLASS}")
            prop:value = move || filter.with(|f| f.search.clone())
            on:input = on_search
          />
          <select class=CONTROL_CLASS on:change = on_visa_type>
            <option value="" prop:selected = move || filter.with(|f| f.visa_type.is_none())>
              "All Visa Types"
            </option>
            {VisaType::ALL
                .into_iter()
                .map(|t| view! {
                  <option
                    value=t.as_str()
                    prop:selected = move || filter.with(|f| f.visa_type == Some(t))
                  >
                    { t.as_str() }
                  </option>
                })
                .collect_view()}
          </select>
          <select class=CONTROL_CLASS on:change = on_sort>
            {SortOrder::ALL
                .into_iter()
                .map(|o| view! {
                  <option value=o.as_str() prop:selected = move || filter.with(|f| f.sort == o)>
                    { o.label() }
                  </option>
                })
                .collect_view()}
          </select>
          <button
            class="px-4 py-2 rounded-lg border border-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700"
            on:click = on_reset
          >
            "Reset"
          </button>
        </div>
        <FetchView
          state = visas
          on_retry
          ready = move |list: Vec<Visa>| {
            let list = filter.with(|f| f.apply(list));
            if list.is_empty() {
              return view! {
                <div class="text-center py-16">
                  <p class="mb-4 text-gray-500">"No visas match your search."</p>
                  <button class="text-blue-600 hover:underline" on:click = on_reset>
                    "Reset filters"
                  </button>
                </div>
              }
              .into_view();
            }
            let count = list.len();
            view! {
              <p class="mb-4 text-sm text-gray-500">
                { format!("Showing {count} visa{}", if count == 1 { "" } else { "s" }) }
              </p>
              <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                {list.into_iter().map(|visa| view! { <VisaCard visa /> }).collect_view()}
              </div>
            }
            .into_view()
          }
        />
      </section>
    }
}

fn to_query(filter: &VisaFilter) -> VisaQuery {
    VisaQuery::filtered(filter.visa_type, &filter.search)
}
