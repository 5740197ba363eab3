use std::collections::HashSet;

use leptos::*;
use leptos_router::*;

use vm_boundary::{Session, Visa};
use vm_core::{fetch::Fetch, form::idempotency_key};

use crate::{
    components::{FetchView, VisaCard},
    confirm, fetch,
    pages::Page,
    AppState,
};

/// Listings added by the signed in user.
#[component]
pub fn MyVisas(app: AppState, session: Session) -> impl IntoView {
    let visas = RwSignal::new(Fetch::<Vec<Visa>>::default());
    // Listings with a pending delete request.
    let deleting = RwSignal::new(HashSet::<String>::new());

    let email = store_value(session.user.email);
    let request = move || {
        let email = email.get_value();
        async move { app.user_api().await?.visas_by_owner(&email).await }
    };

    fetch::load(visas, request());

    let on_retry = Callback::new(move |()| fetch::retry(visas, request));

    let on_delete = Callback::new(move |visa: (String, String)| {
        let (id, country) = visa;
        if deleting.with_untracked(|d| d.contains(&id)) {
            return;
        }
        match confirm(&format!("Delete the visa for {country}?")) {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                log::warn!("Unable to ask for confirmation: {err}");
                return;
            }
        }
        deleting.update(|d| {
            d.insert(id.clone());
        });
        spawn_local(async move {
            let result = match app.user_api().await {
                Ok(api) => api.delete_visa(&id, &idempotency_key()).await,
                Err(err) => Err(err),
            };
            deleting.try_update(|d| d.remove(&id));
            match result {
                Ok(_) => {
                    log::info!("Deleted visa {id}");
                    visas.try_update(|v| v.modify(|list| list.retain(|visa| visa.id != id)));
                    app.success("Visa deleted successfully!");
                }
                Err(err) => app.error(format!("Failed to delete visa: {err}")),
            }
        });
    });

    view! {
      <section class="container mx-auto px-6 py-12">
        <h1 class="text-3xl font-bold mb-8 text-center">"My Added Visas"</h1>
        <FetchView
          state = visas
          on_retry
          ready = move |list: Vec<Visa>| {
            if list.is_empty() {
              return view! {
                <div class="text-center py-16">
                  <p class="mb-4 text-gray-500">"You have not added any visas yet."</p>
                  <A href=Page::AddVisa.path() class="text-blue-600 hover:underline".to_string()>
                    "Add your first visa"
                  </A>
                </div>
              }
              .into_view();
            }
            view! {
              <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                {list
                    .into_iter()
                    .map(|visa| view! { <OwnedVisa visa deleting on_delete /> })
                    .collect_view()}
              </div>
            }
            .into_view()
          }
        />
      </section>
    }
}

#[component]
fn OwnedVisa(
    visa: Visa,
    deleting: RwSignal<HashSet<String>>,
    on_delete: Callback<(String, String)>,
) -> impl IntoView {
    let id = visa.id.clone();
    let target = (visa.id.clone(), visa.country_name.clone());
    let busy = {
        let id = id.clone();
        move || deleting.with(|d| d.contains(&id))
    };
    view! {
      <VisaCard visa>
        <A
          href=Page::edit_visa(&id)
          class="px-4 py-2 rounded-lg border border-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700".to_string()
        >
          "Update"
        </A>
        <button
          class="px-4 py-2 rounded-lg text-white bg-red-600 hover:bg-red-700 disabled:opacity-50"
          prop:disabled = busy
          on:click = move |_| on_delete.call(target.clone())
        >
          "Delete"
        </button>
      </VisaCard>
    }
}
