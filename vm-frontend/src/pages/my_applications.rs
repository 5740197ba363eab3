use leptos::*;

use vm_boundary::{ApplicationStatus, Session, VisaApplication};
use vm_core::{
    fetch::Fetch,
    query::{ApplicationFilter, StatusSummary},
};
use vm_frontend_api::ApplicationQuery;

use crate::{
    components::{ApplicationCard, FetchView},
    fetch, AppState,
};

const CONTROL_CLASS: &str = "px-3 py-2 rounded-lg border border-gray-300 bg-gray-50 text-gray-900 dark:bg-gray-700 dark:border-gray-600 dark:text-white";

/// Applications submitted by the signed in user.
#[component]
pub fn MyApplications(app: AppState, session: Session) -> impl IntoView {
    // -- signals -- //

    // The filter being edited and the one that has been searched for.
    let draft = RwSignal::new(ApplicationFilter::default());
    let applied = RwSignal::new(ApplicationFilter::default());
    let applications = RwSignal::new(Fetch::<Vec<VisaApplication>>::default());

    let email = store_value(session.user.email);
    let request = move || {
        let email = email.get_value();
        let query = applied.with_untracked(|f| ApplicationQuery {
            country_name: Some(f.country.trim().to_owned()).filter(|c| !c.is_empty()),
            status: f.status,
        });
        async move { app.user_api().await?.applications(&email, &query).await }
    };

    // -- effects -- //

    Effect::new(move |_| {
        applied.track();
        fetch::load(applications, request());
    });

    // -- callbacks -- //

    let on_retry = Callback::new(move |()| fetch::retry(applications, request));

    let on_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        applied.set(draft.get_untracked());
    };
    let on_reset = move |_| {
        draft.set(ApplicationFilter::default());
        applied.set(ApplicationFilter::default());
    };

    view! {
      <section class="container mx-auto px-6 py-12">
        <h1 class="text-3xl font-bold mb-8 text-center">"My Visa Applications"</h1>
        <form class="flex flex-col md:flex-row gap-4 mb-8" on:submit = on_search>
          <input
            type="search"
            placeholder="Search by country"
            class=format!("flex-1 {CONTROL_CLASS}")
            prop:value = move || draft.with(|f| f.country.clone())
            on:input = move |ev| {
              let country = event_target_value(&ev);
              draft.update(|f| f.country = country);
            }
          />
          <select
            class=CONTROL_CLASS
            on:change = move |ev| {
              let status = event_target_value(&ev).parse::<ApplicationStatus>().ok();
              draft.update(|f| f.status = status);
            }
          >
            <option value="" prop:selected = move || draft.with(|f| f.status.is_none())>
              "All Statuses"
            </option>
            {ApplicationStatus::ALL
                .into_iter()
                .map(|s| view! {
                  <option value=s.as_str() prop:selected = move || draft.with(|f| f.status == Some(s))>
                    { capitalize(s.as_str()) }
                  </option>
                })
                .collect_view()}
          </select>
          <button type="submit" class="px-4 py-2 rounded-lg text-white bg-blue-600 hover:bg-blue-700">
            "Search"
          </button>
          <button
            type="button"
            class="px-4 py-2 rounded-lg border border-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700"
            on:click = on_reset
          >
            "Reset"
          </button>
        </form>
        <FetchView
          state = applications
          on_retry
          ready = move |list: Vec<VisaApplication>| {
            let list = applied.with(|f| {
              list.into_iter().filter(|a| f.matches(a)).collect::<Vec<_>>()
            });
            let summary = StatusSummary::new(&list);
            if list.is_empty() {
              return view! {
                <p class="text-center py-16 text-gray-500">"No applications found."</p>
              }
              .into_view();
            }
            view! {
              <Summary summary />
              <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                {list
                    .into_iter()
                    .map(|application| view! { <ApplicationCard application /> })
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
fn Summary(summary: StatusSummary) -> impl IntoView {
    let StatusSummary {
        total,
        pending,
        approved,
        rejected,
        processing,
    } = summary;
    let items = [
        ("Total", total),
        ("Pending", pending),
        ("Processing", processing),
        ("Approved", approved),
        ("Rejected", rejected),
    ];
    view! {
      <div class="grid grid-cols-2 md:grid-cols-5 gap-4 mb-8">
        {items
            .into_iter()
            .map(|(label, count)| view! {
              <div class="p-4 rounded-lg text-center bg-white dark:bg-gray-800 shadow">
                <div class="text-2xl font-bold">{ count }</div>
                <div class="text-sm text-gray-500">{ label }</div>
              </div>
            })
            .collect_view()}
      </div>
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
