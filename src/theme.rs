use crate::telemetry::{log_event, LogConfig, LogLevel};
use serde::Serialize;
use serde_json::json;
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use thiserror::Error;

pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Glyph for the toggle button: a sun while dark, a moon while light.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("persistent storage is unavailable")]
    Unavailable,
    #[error("storage rejected access to `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

impl StorageError {
    pub fn rejected(key: &str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Key-value backend holding the theme preference.
pub trait ThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory [`ThemeStore`]. Clones share entries, so a test can keep a handle
/// after moving one into [`ThemePersistence`].
#[derive(Clone, Debug, Default)]
pub struct MemoryThemeStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    unavailable: bool,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.value(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct ThemePersistence<S> {
    store: S,
    log: LogConfig,
}

impl<S: ThemeStore> ThemePersistence<S> {
    pub fn new(store: S, log: LogConfig) -> Self {
        Self { store, log }
    }

    /// Stored preference, or [`Theme::Dark`] when nothing usable is stored.
    pub fn load(&self) -> Theme {
        match self.store.read(THEME_STORAGE_KEY) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                log_event(
                    &self.log,
                    LogLevel::Debug,
                    "theme.unrecognized",
                    json!({ "key": THEME_STORAGE_KEY, "value": value }),
                );
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                log_event(
                    &self.log,
                    LogLevel::Debug,
                    "theme.load_failed",
                    json!({ "key": THEME_STORAGE_KEY, "error": err.to_string() }),
                );
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) {
        if let Err(err) = self.store.write(THEME_STORAGE_KEY, theme.as_str()) {
            log_event(
                &self.log,
                LogLevel::Debug,
                "theme.save_failed",
                json!({ "key": THEME_STORAGE_KEY, "theme": theme, "error": err.to_string() }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persistence(store: MemoryThemeStore) -> ThemePersistence<MemoryThemeStore> {
        ThemePersistence::new(store, LogConfig::default())
    }

    #[test]
    fn missing_value_defaults_to_dark() {
        assert_eq!(persistence(MemoryThemeStore::new()).load(), Theme::Dark);
    }

    #[test]
    fn saved_theme_round_trips() {
        for theme in [Theme::Dark, Theme::Light] {
            let store = MemoryThemeStore::new();
            let persistence = persistence(store.clone());

            persistence.save(theme);

            assert_eq!(persistence.load(), theme);
            assert_eq!(store.value(THEME_STORAGE_KEY).as_deref(), Some(theme.as_str()));
        }
    }

    #[test]
    fn unrecognized_value_falls_back_to_dark() {
        let store = MemoryThemeStore::with_entry(THEME_STORAGE_KEY, "sepia");

        assert_eq!(persistence(store).load(), Theme::Dark);
    }

    #[test]
    fn unavailable_storage_is_absorbed() {
        let persistence = persistence(MemoryThemeStore::unavailable());

        persistence.save(Theme::Light);

        assert_eq!(persistence.load(), Theme::Dark);
    }

    #[test]
    fn last_write_wins() {
        let store = MemoryThemeStore::new();
        let persistence = persistence(store.clone());

        persistence.save(Theme::Light);
        persistence.save(Theme::Dark);

        assert_eq!(store.value(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_helpers_describe_next_theme() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
        assert_eq!(serde_json::to_value(Theme::Light).ok(), Some(serde_json::json!("light")));
    }
}
