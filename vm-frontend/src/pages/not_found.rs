use leptos::*;
use leptos_router::*;

use crate::pages::Page;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
      <section class="container mx-auto px-6 py-24 text-center">
        <h1 class="text-6xl font-bold mb-4">"404"</h1>
        <p class="mb-8 text-gray-600 dark:text-gray-300">"The page you are looking for does not exist."</p>
        <A
          href=Page::Home.path()
          class="px-5 py-2.5 rounded-lg text-white bg-blue-600 hover:bg-blue-700".to_string()
        >
          "Back to home"
        </A>
      </section>
    }
}
