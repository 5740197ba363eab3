use leptos::*;

use vm_core::notify::{Level, Notification, Notifications, DISPLAY_DURATION};

#[component]
pub fn Toasts(toasts: RwSignal<Notifications>) -> impl IntoView {
    view! {
      <div class="fixed top-4 left-1/2 -translate-x-1/2 z-50 flex flex-col gap-2">
        <For
          each = move || toasts.with(|t| t.items().to_vec())
          key = |n| n.id
          let:notification
        >
          <Toast toasts notification />
        </For>
      </div>
    }
}

#[component]
fn Toast(toasts: RwSignal<Notifications>, notification: Notification) -> impl IntoView {
    let Notification { id, level, message } = notification;

    set_timeout(
        move || {
            toasts.try_update(|t| t.dismiss(id));
        },
        DISPLAY_DURATION,
    );

    let class = match level {
        Level::Success => "px-4 py-3 rounded-lg shadow-lg bg-gray-800 text-white border-l-4 border-green-500",
        Level::Error => "px-4 py-3 rounded-lg shadow-lg bg-gray-800 text-white border-l-4 border-red-500",
    };

    view! {
      <div class=class role="alert" on:click=move |_| toasts.update(|t| t.dismiss(id))>
        { message }
      </div>
    }
}
