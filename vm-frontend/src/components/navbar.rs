use leptos::*;
use leptos_router::*;

use vm_boundary::User;
use vm_core::{profile::display_name, theme::Theme};

use crate::{pages::Page, AppState};

#[component]
pub fn NavBar<F>(app: AppState, theme: Signal<Theme>, on_toggle_theme: F) -> impl IntoView
where
    F: Fn() + 'static + Copy,
{
    let (menu_open, set_menu_open) = create_signal(false);
    let navigate = use_navigate();

    let user = create_memo(move |_| app.session().map(|s| s.user));
    let resolved = Signal::derive(move || app.auth.with(|auth| auth.is_resolved()));

    let on_sign_out = move || {
        log::info!("Sign out");
        app.sign_out();
        app.success("Signed out");
        set_menu_open.set(false);
        navigate(Page::Home.path(), NavigateOptions::default());
    };
    let on_sign_out = store_value(on_sign_out);
    let on_sign_out = move || on_sign_out.with_value(|f| f());

    view! {
      <nav class="relative container mx-auto p-6">
        <div class="flex items-center justify-between">

          // Logo
          <div class="pt-2 text-xl font-bold">
            <A href = Page::Home.path()>"VisaMaster"</A>
          </div>

          // Menu items
          <div class="hidden items-center space-x-6 md:flex">
            <Menu user resolved on_sign_out />
            <ThemeToggle theme on_toggle_theme />
          </div>

          // Hamburger Icon
          <button
            class = {move ||
              if menu_open.get() {
                "open block hamburger md:hidden focus:outline-none"
              } else {
                "block hamburger md:hidden focus:outline-none"
              }
            }
            on:click = move |_| set_menu_open.update(|s|*s = !*s)
          >
            <span class="hamburger-top"></span>
            <span class="hamburger-middle"></span>
            <span class="hamburger-bottom"></span>
          </button>
        </div>

        // Mobile Menu
        <div class="md:hidden">
          <menu
            class = {move ||
              if menu_open.get() {
                "absolute z-40 flex flex-col items-center self-end py-8 mt-10 space-y-6 font-bold bg-white dark:bg-gray-800 sm:w-auto sm:self-center left-6 right-6 drop-shadow-md"
              } else {
                "hidden absolute z-40 flex-col items-center self-end py-8 mt-10 space-y-6 font-bold bg-white dark:bg-gray-800 sm:w-auto sm:self-center left-6 right-6 drop-shadow-md"
              }
            }
            on:click = move |_| set_menu_open.set(false)
          >
            <Menu user resolved on_sign_out />
            <ThemeToggle theme on_toggle_theme />
          </menu>
        </div>
      </nav>
    }
}

#[component]
fn Menu<F>(user: Memo<Option<User>>, resolved: Signal<bool>, on_sign_out: F) -> impl IntoView
where
    F: Fn() + 'static + Copy,
{
    view! {
      <MenuItem page = Page::Home label = "Home" />
      <MenuItem page = Page::AllVisas label = "All Visas" />
      {move || match user.get() {
          Some(user) => view! { <UserMenuItems user on_sign_out /> }.into_view(),
          // Avoid flashing the login button while the session is restored.
          None if !resolved.get() => ().into_view(),
          None => view! { <PublicMenuItems /> }.into_view(),
      }}
    }
}

#[component]
fn UserMenuItems<F>(user: User, on_sign_out: F) -> impl IntoView
where
    F: Fn() + 'static + Copy,
{
    let name = display_name(&user).to_owned();
    view! {
      <MenuItem page = Page::AddVisa label = "Add Visa" />
      <MenuItem page = Page::MyVisas label = "My Added Visas" />
      <MenuItem page = Page::MyApplications label = "My Applications" />
      <A href = Page::Profile.path() class="flex items-center gap-2 hover:text-gray-600".to_string()>
        {user.photo_url.map(|url| view! {
          <img src=url alt="" class="w-8 h-8 rounded-full object-cover" />
        })}
        <span>{ name }</span>
      </A>
      <button class="hover:text-gray-600" on:click = move |_| on_sign_out()>
        "Sign out"
      </button>
    }
}

#[component]
fn PublicMenuItems() -> impl IntoView {
    view! {
      <MenuItem page = Page::Login label = "Login" />
      <MenuItem page = Page::Register label = "Register" />
    }
}

#[component]
fn MenuItem(page: Page, label: &'static str) -> impl IntoView {
    view! {
      <A href=page.path() class="hover:text-gray-600".to_string()>{ label }</A>
    }
}

#[component]
fn ThemeToggle<F>(theme: Signal<Theme>, on_toggle_theme: F) -> impl IntoView
where
    F: Fn() + 'static + Copy,
{
    view! {
      <button
        class="px-3 py-1 rounded-full border border-gray-300 dark:border-gray-600"
        title="Toggle theme"
        on:click = move |ev| {
          ev.stop_propagation();
          on_toggle_theme();
        }
      >
        {move || if theme.get().is_dark() { "Light" } else { "Dark" }}
      </button>
    }
}
