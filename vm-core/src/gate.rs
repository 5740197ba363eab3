//! Access control for pages that require a signed in user.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use time::{Duration, OffsetDateTime};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Name of the query parameter that carries the requested path.
pub const FROM_PARAM: &str = "from";

/// Lifetime of an ID token if the provider does not report one.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::hours(1);

/// ID tokens are renewed this long before they run out.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::minutes(5);

const MAX_TOKEN_LIFETIME: Duration = Duration::days(1);

const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState<U> {
    /// The persisted session has not been resolved yet.
    #[default]
    Unknown,
    Authenticated(U),
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<'a, U> {
    /// Show a waiting indicator.
    Wait,
    Granted(&'a U),
    /// Navigate to the contained login URL.
    Redirect(String),
}

impl<U> AuthState<U> {
    /// Decides what a protected page at `requested` should render.
    pub fn access(&self, requested: &str) -> Access<'_, U> {
        match self {
            Self::Unknown => Access::Wait,
            Self::Authenticated(user) => Access::Granted(user),
            Self::Unauthenticated => Access::Redirect(login_redirect(requested)),
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&U> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn sign_in(&mut self, user: U) {
        log::debug!("Session established");
        *self = Self::Authenticated(user);
    }

    pub fn sign_out(&mut self) {
        log::debug!("Session cleared");
        *self = Self::Unauthenticated;
    }

    /// Ends the `Unknown` state with the outcome of the session restore.
    pub fn resolve(&mut self, user: Option<U>) {
        match user {
            Some(user) => self.sign_in(user),
            None => self.sign_out(),
        }
    }
}

/// Tells when the ID token of a session has to be renewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetime {
    expires_at: OffsetDateTime,
}

impl TokenLifetime {
    /// Lifetime of a token issued at `issued_at` that is valid for
    /// `expires_in` seconds.
    #[must_use]
    pub fn new(issued_at: OffsetDateTime, expires_in: Option<u64>) -> Self {
        let lifetime = expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .map_or(DEFAULT_TOKEN_LIFETIME, Duration::seconds)
            .min(MAX_TOKEN_LIFETIME);
        Self {
            expires_at: issued_at + lifetime,
        }
    }

    #[must_use]
    pub const fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    /// Whether the token must be renewed before it is sent at `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: OffsetDateTime) -> bool {
        now + TOKEN_REFRESH_MARGIN >= self.expires_at
    }
}

/// The login URL that leads back to `requested` afterwards.
#[must_use]
pub fn login_redirect(requested: &str) -> String {
    with_return_path(LOGIN_PATH, requested)
}

/// Links to `page` and carries `requested` along as the return path.
#[must_use]
pub fn with_return_path(page: &str, requested: &str) -> String {
    if requested.is_empty() || requested == "/" {
        return page.to_owned();
    }
    format!(
        "{page}?{FROM_PARAM}={}",
        utf8_percent_encode(requested, QUERY_VALUE)
    )
}

/// The path to navigate to after a successful sign in.
///
/// `from` is the already decoded query value.
/// Only local absolute paths are accepted, everything else yields `/`.
#[must_use]
pub fn return_path(from: Option<&str>) -> String {
    let Some(from) = from else {
        return "/".to_owned();
    };
    let is_local = from.starts_with('/')
        && !from.starts_with("//")
        && !from.contains('\\')
        && !from.chars().any(char::is_control);
    if is_local {
        from.to_owned()
    } else {
        log::warn!("Ignore invalid return path: {from}");
        "/".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use percent_encoding::percent_decode_str;
    use time::macros::datetime;

    use super::*;

    /// Reads the `from` value the way the router hands it out.
    fn from_param(url: &str) -> Option<String> {
        url.split_once("from=")
            .map(|(_, v)| percent_decode_str(v).decode_utf8_lossy().into_owned())
    }

    #[test]
    fn wait_while_unknown() {
        let state = AuthState::<&str>::default();
        assert_eq!(state.access("/my-added-visas"), Access::Wait);
        assert!(!state.is_resolved());
    }

    #[test]
    fn redirect_unauthenticated_and_return_to_requested_route() {
        let mut state = AuthState::<&str>::Unknown;
        state.resolve(None);
        let Access::Redirect(url) = state.access("/my-visa-applications") else {
            panic!("expected redirect");
        };
        assert_eq!(url, "/login?from=/my-visa-applications");

        let from = from_param(&url);
        state.sign_in("jane");
        assert_eq!(return_path(from.as_deref()), "/my-visa-applications");
        assert_eq!(state.access("/my-visa-applications"), Access::Granted(&"jane"));
    }

    #[test]
    fn query_of_requested_path_survives() {
        let url = login_redirect("/visas?type=Work Visa&q=a");
        assert_eq!(url, "/login?from=/visas%3Ftype%3DWork%20Visa%26q%3Da");
        let from = from_param(&url);
        assert_eq!(return_path(from.as_deref()), "/visas?type=Work Visa&q=a");
    }

    #[test]
    fn literal_percent_in_return_path_is_kept() {
        let requested = "/all-visas?q=100%25";
        let from = from_param(&login_redirect(requested));
        assert_eq!(from.as_deref(), Some(requested));
        assert_eq!(return_path(from.as_deref()), requested);
        assert_eq!(return_path(Some("/a%2Fb")), "/a%2Fb");
    }

    #[test]
    fn default_return_path_is_home() {
        assert_eq!(return_path(None), "/");
        assert_eq!(login_redirect("/"), "/login");
    }

    #[test]
    fn reject_foreign_return_paths() {
        assert_eq!(return_path(Some("https://evil.example")), "/");
        assert_eq!(return_path(Some("//evil.example")), "/");
        assert_eq!(return_path(from_param("/login?from=%2F%2Fevil.example").as_deref()), "/");
        assert_eq!(return_path(Some("/\\evil.example")), "/");
    }

    #[test]
    fn pass_return_path_on_to_another_page() {
        assert_eq!(
            with_return_path("/register", "/add-visa"),
            "/register?from=/add-visa"
        );
        assert_eq!(with_return_path("/register", "/"), "/register");
    }

    #[test]
    fn renew_token_shortly_before_it_expires() {
        let issued_at = datetime!(2025-03-10 12:00 UTC);
        let lifetime = TokenLifetime::new(issued_at, Some(3600));
        assert_eq!(lifetime.expires_at(), datetime!(2025-03-10 13:00 UTC));
        assert!(!lifetime.needs_refresh(issued_at));
        assert!(!lifetime.needs_refresh(datetime!(2025-03-10 12:54:59 UTC)));
        assert!(lifetime.needs_refresh(datetime!(2025-03-10 12:55 UTC)));
        assert!(lifetime.needs_refresh(datetime!(2025-03-10 13:01 UTC)));
    }

    #[test]
    fn token_lifetime_without_or_with_odd_expiry() {
        let issued_at = datetime!(2025-03-10 12:00 UTC);
        assert_eq!(
            TokenLifetime::new(issued_at, None).expires_at(),
            issued_at + DEFAULT_TOKEN_LIFETIME
        );
        assert_eq!(
            TokenLifetime::new(issued_at, Some(u64::MAX)).expires_at(),
            datetime!(2025-03-11 12:00 UTC)
        );
        assert!(TokenLifetime::new(issued_at, Some(0)).needs_refresh(issued_at));
    }

    #[test]
    fn sign_out() {
        let mut state = AuthState::Authenticated(1);
        state.sign_out();
        assert_eq!(state, AuthState::Unauthenticated);
        assert_eq!(state.user(), None);
    }
}
