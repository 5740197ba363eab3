use leptos::*;
use leptos_router::*;

use crate::Page;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
      <footer class="bg-gray-800 text-gray-300 py-8">
        <div class="container mx-auto px-6 flex flex-col md:flex-row justify-between gap-4">
          <div>
            <p class="font-bold text-white">"VisaMaster"</p>
            <p class="text-sm">"Find the right visa and apply in minutes."</p>
          </div>
          <div class="flex gap-6 text-sm">
            <A href=Page::Home.path()>"Home"</A>
            <A href=Page::AllVisas.path()>"All Visas"</A>
          </div>
        </div>
      </footer>
    }
}
