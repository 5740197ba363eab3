//! Light/dark display mode.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Persistent key/value storage for user preferences.
pub trait PreferenceStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownTheme(s.to_owned())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The process wide theme backed by a [`PreferenceStorage`].
#[derive(Debug)]
pub struct ThemeStore<S> {
    storage: S,
    current: Theme,
}

impl<S> ThemeStore<S>
where
    S: PreferenceStorage,
{
    /// Reads the persisted theme once, falling back to [`Theme::Light`].
    pub fn load(storage: S) -> Self {
        let current = match storage.load(THEME_KEY) {
            Some(value) => value.parse().unwrap_or_else(|err| {
                log::warn!("{err}");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Self { storage, current }
    }

    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Switches between light and dark and persists the result.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled());
        self.current
    }

    pub fn set(&mut self, theme: Theme) {
        log::debug!("Theme changed to {theme}");
        self.current = theme;
        self.storage.store(THEME_KEY, theme.as_str());
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    #[derive(Debug, Default)]
    pub struct MemoryStorage(RefCell<HashMap<String, String>>);

    impl PreferenceStorage for &MemoryStorage {
        fn load(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn store(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        }
    }

    #[test]
    fn default_to_light() {
        let storage = MemoryStorage::default();
        assert_eq!(ThemeStore::load(&storage).current(), Theme::Light);
    }

    #[test]
    fn ignore_invalid_value() {
        let storage = MemoryStorage::default();
        (&storage).store(THEME_KEY, "sepia");
        assert_eq!(ThemeStore::load(&storage).current(), Theme::Light);
    }

    #[test]
    fn toggle_persists_every_change() {
        let storage = MemoryStorage::default();
        let mut store = ThemeStore::load(&storage);
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!((&storage).load(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(ThemeStore::load(&storage).current(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!((&storage).load(THEME_KEY).as_deref(), Some("light"));
    }
}
