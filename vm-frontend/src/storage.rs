use gloo_storage::{LocalStorage, SessionStorage, Storage};

use vm_boundary::Session;
use vm_core::theme::PreferenceStorage;

const SESSION_KEY: &str = "session";

/// Where the session of the signed in user is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Survives closing the browser.
    Local,
    /// Cleared when the browser tab is closed.
    #[default]
    Tab,
}

impl Persistence {
    #[must_use]
    pub const fn new(remember_me: bool) -> Self {
        if remember_me {
            Self::Local
        } else {
            Self::Tab
        }
    }
}

pub fn load_session() -> Option<(Session, Persistence)> {
    if let Ok(session) = LocalStorage::get(SESSION_KEY) {
        return Some((session, Persistence::Local));
    }
    SessionStorage::get(SESSION_KEY)
        .ok()
        .map(|session| (session, Persistence::Tab))
}

pub fn save_session(session: &Session, persistence: Persistence) {
    clear_session();
    let result = match persistence {
        Persistence::Local => LocalStorage::set(SESSION_KEY, session),
        Persistence::Tab => SessionStorage::set(SESSION_KEY, session),
    };
    if let Err(err) = result {
        log::warn!("Unable to save session: {err}");
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
    SessionStorage::delete(SESSION_KEY);
}

/// User preferences in the `LocalStorage` of the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl PreferenceStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::get(key).ok()
    }
    fn store(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            log::warn!("Unable to store {key}: {err}");
        }
    }
}
