use leptos::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
      <div class="flex justify-center items-center py-16" role="status">
        <div class="w-12 h-12 rounded-full border-4 border-blue-200 border-t-blue-600 animate-spin"></div>
        <span class="sr-only">"Loading..."</span>
      </div>
    }
}
