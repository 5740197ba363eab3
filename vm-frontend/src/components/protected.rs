use leptos::*;
use leptos_router::*;

use vm_boundary::Session;
use vm_core::gate::Access;

use crate::{AppState, Spinner};

/// Renders `render` only for signed in users,
/// everybody else is sent to the login page.
#[component]
pub fn Protected<F, V>(app: AppState, render: F) -> impl IntoView
where
    F: Fn(Session) -> V + 'static,
    V: IntoView,
{
    let location = use_location();
    let navigate = use_navigate();

    let requested = move || {
        let path = location.pathname.get();
        let search = location.search.get();
        let search = search.trim_start_matches('?');
        if search.is_empty() {
            path
        } else {
            format!("{path}?{search}")
        }
    };

    // Re-render only if another user signs in, not on token refresh.
    let uid = create_memo(move |_| {
        app.auth
            .with(|auth| auth.user().map(|session| session.user.uid.clone()))
    });

    Effect::new(move |_| {
        let requested = requested();
        let redirect = app.auth.with(|auth| match auth.access(&requested) {
            Access::Redirect(url) => Some(url),
            Access::Wait | Access::Granted(_) => None,
        });
        if let Some(url) = redirect {
            log::debug!("{requested} requires a signed in user");
            navigate(
                &url,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || {
        uid.track();
        app.auth
            .with_untracked(|auth| auth.user().cloned())
            .map_or_else(|| view! { <Spinner /> }.into_view(), |s| render(s).into_view())
    }
}
