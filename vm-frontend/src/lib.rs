use anyhow::anyhow;
use leptos::*;
use leptos_router::*;
use time::OffsetDateTime;

use vm_boundary::Session;
use vm_core::{
    gate::{AuthState, TokenLifetime},
    notify::Notifications,
    theme::{Theme, ThemeStore},
};
use vm_frontend_api as api;

mod components;
mod config;
mod fetch;
mod form;
mod pages;
mod storage;

use self::{components::*, pages::*, storage::*};

/// Signals and clients shared by all pages.
#[derive(Clone, Copy)]
pub struct AppState {
    pub auth: RwSignal<AuthState<Session>>,
    persistence: RwSignal<Persistence>,
    lifetime: RwSignal<Option<TokenLifetime>>,
    pub toasts: RwSignal<Notifications>,
    pub public_api: api::PublicApi,
    pub identity_api: api::IdentityApi,
}

impl AppState {
    fn new() -> Self {
        Self {
            auth: RwSignal::new(AuthState::Unknown),
            persistence: RwSignal::new(Persistence::default()),
            lifetime: RwSignal::new(None),
            toasts: RwSignal::new(Notifications::default()),
            public_api: api::PublicApi::new(config::API_URL),
            identity_api: api::IdentityApi::new(
                config::IDENTITY_URL,
                config::TOKEN_URL,
                config::IDENTITY_API_KEY,
            ),
        }
    }

    /// The signed in user (tracked).
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.auth.with(|auth| auth.user().cloned())
    }

    /// The signed in user with an ID token that is still valid.
    ///
    /// The token is renewed shortly before it runs out.
    /// If the provider refuses the renewal the user is signed out.
    pub async fn fresh_session(&self) -> Result<Session, api::Error> {
        let Some(session) = self.auth.with_untracked(|auth| auth.user().cloned()) else {
            return Err(api::IdentityError::SessionExpired.into());
        };
        let expiring = self
            .lifetime
            .get_untracked()
            .is_none_or(|lifetime| lifetime.needs_refresh(now()));
        if !expiring {
            return Ok(session);
        }
        log::debug!("Renew ID token of {}", session.user.uid);
        match self.identity_api.refresh(&session.refresh_token).await {
            Ok(session) => {
                self.refresh_session(session.clone());
                Ok(session)
            }
            Err(err) => {
                log::warn!("Unable to renew ID token: {err}");
                if err == api::Error::Identity(api::IdentityError::SessionExpired) {
                    self.sign_out();
                }
                Err(err)
            }
        }
    }

    /// API client on behalf of the signed in user.
    pub async fn user_api(&self) -> Result<api::UserApi, api::Error> {
        let session = self.fresh_session().await?;
        Ok(api::UserApi::new(config::API_URL, session.id_token))
    }

    pub fn sign_in(&self, session: Session, persistence: Persistence) {
        save_session(&session, persistence);
        self.persistence.set(persistence);
        self.lifetime
            .set(Some(TokenLifetime::new(now(), session.expires_in)));
        self.auth.update(|auth| auth.sign_in(session));
    }

    /// Replaces the session after the user changed the profile.
    pub fn refresh_session(&self, session: Session) {
        self.sign_in(session, self.persistence.get_untracked());
    }

    pub fn sign_out(&self) {
        clear_session();
        self.lifetime.set(None);
        self.auth.update(AuthState::sign_out);
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        self.toasts.update(|t| {
            t.success(message);
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        self.toasts.update(|t| {
            t.error(message);
        });
    }
}

#[component]
#[must_use]
pub fn App() -> impl IntoView {
    // -- signals -- //

    let app = AppState::new();
    let theme = RwSignal::new(ThemeStore::load(BrowserStorage));

    // -- actions -- //

    let restore_session = Action::new(move |()| async move {
        let Some((stored, persistence)) = load_session() else {
            log::debug!("No session to restore");
            app.auth.update(|auth| auth.resolve(None));
            return;
        };
        match app.identity_api.refresh(&stored.refresh_token).await {
            Ok(session) => {
                log::info!("Restored session of {}", session.user.email);
                app.sign_in(session, persistence);
            }
            Err(err) => {
                log::warn!("Unable to restore session: {err}");
                app.sign_out();
            }
        }
    });

    // -- callbacks -- //

    let on_toggle_theme = move || {
        theme.update(|t| {
            t.toggle();
        });
    };

    // -- init session -- //

    restore_session.dispatch(());

    // -- effects -- //

    Effect::new(move |_| {
        let current = theme.with(ThemeStore::current);
        if let Err(err) = apply_theme(current) {
            log::warn!("Unable to apply theme: {err}");
        }
    });

    let current_theme = Signal::derive(move || theme.with(ThemeStore::current));

    view! {
      <Router>
        <NavBar app theme = current_theme on_toggle_theme />
        <Toasts toasts = app.toasts />
        <main class="min-h-screen">
          <Routes>
            <Route
              path=Page::Home.path()
              view=move || view! { <Home app /> }
            />
            <Route
              path=Page::AllVisas.path()
              view=move || view! { <AllVisas app /> }
            />
            <Route
              path=Page::VisaDetails.path()
              view=move || view! { <VisaDetails app /> }
            />
            <Route
              path=Page::AddVisa.path()
              view=move || view! {
                <Protected app render = move |session| view! { <AddVisa app session /> } />
              }
            />
            <Route
              path=Page::EditVisa.path()
              view=move || view! {
                <Protected app render = move |session| view! { <EditVisa app session /> } />
              }
            />
            <Route
              path=Page::MyVisas.path()
              view=move || view! {
                <Protected app render = move |session| view! { <MyVisas app session /> } />
              }
            />
            <Route
              path=Page::MyApplications.path()
              view=move || view! {
                <Protected app render = move |session| view! { <MyApplications app session /> } />
              }
            />
            <Route
              path=Page::Profile.path()
              view=move || view! {
                <Protected app render = move |session| view! { <Profile app session /> } />
              }
            />
            <Route
              path=Page::Login.path()
              view=move || view! { <Login app /> }
            />
            <Route
              path=Page::Register.path()
              view=move || view! { <Register app /> }
            />
            <Route
              path="/*any"
              view=NotFound
            />
          </Routes>
        </main>
        <Footer />
      </Router>
    }
}

pub fn run() {
    mount_to_body(|| view! { <App /> });
}

/// The current local time of the browser.
fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn apply_theme(theme: Theme) -> anyhow::Result<()> {
    let root = document()
        .document_element()
        .ok_or_else(|| anyhow!("missing document element"))?;
    root.class_list()
        .toggle_with_force("dark", theme.is_dark())
        .map_err(js_error)?;
    log::debug!("Applied {theme} theme");
    Ok(())
}

/// Asks the user with the native browser dialog.
fn confirm(message: &str) -> anyhow::Result<bool> {
    window().confirm_with_message(message).map_err(js_error)
}

#[allow(clippy::needless_pass_by_value)]
fn js_error(err: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!(err
        .as_string()
        .unwrap_or_else(|| "unknown JS error".to_string()))
}
