use leptos::*;

use vm_core::fetch::{Fetch, FetchState};

use crate::Spinner;

/// Renders the state of a [`Fetch`].
///
/// A retry control is only offered if `on_retry` is given.
#[component]
pub fn FetchView<T, R, V>(
    state: RwSignal<Fetch<T>>,
    ready: R,
    #[prop(optional, into)] on_retry: Option<Callback<()>>,
    #[prop(default = "Not found")] not_found: &'static str,
) -> impl IntoView
where
    T: Clone + 'static,
    R: Fn(T) -> V + 'static,
    V: IntoView,
{
    move || match state.with(|s| s.state().clone()) {
        FetchState::Loading => view! { <Spinner /> }.into_view(),
        FetchState::NotFound => view! {
          <div class="text-center py-16">
            <h2 class="text-2xl font-bold">{ not_found }</h2>
          </div>
        }
        .into_view(),
        FetchState::Failed(msg) => view! { <ErrorBox message = msg on_retry /> }.into_view(),
        FetchState::Ready(data) => ready(data).into_view(),
    }
}

#[component]
pub fn ErrorBox(
    message: String,
    #[prop(default = None)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
      <div class="max-w-xl mx-auto my-12 p-6 rounded-lg bg-red-50 dark:bg-red-900/30 text-center" role="alert">
        <p class="text-red-700 dark:text-red-300 mb-4">{ message }</p>
        {on_retry.map(|cb| view! {
          <button
            class="px-4 py-2 rounded-lg border border-gray-300 bg-white text-gray-800 hover:bg-gray-100"
            on:click = move |_| cb.call(())
          >
            "Try again"
          </button>
        })}
      </div>
    }
}
