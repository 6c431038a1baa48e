//! Reader preferences: theme, bookmarked modules, completed modules.
//!
//! Stored as strings under fixed keys in a `KeyValueStore` (browser local
//! storage on the site). Lists are JSON arrays of module ids.

use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dom::{DocumentPart, DomEffects};

pub const THEME_KEY: &str = "theme";
pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const COMPLETED_KEY: &str = "completedModules";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Put the theme on `<html>`: the `dark` class plus `data-theme`.
pub fn apply_theme(dom: &dyn DomEffects, theme: Theme) {
    dom.set_part_class(DocumentPart::Root, "dark", theme == Theme::Dark);
    dom.set_part_attribute(DocumentPart::Root, "data-theme", theme.as_str());
}

/// Theme currently applied to the document.
pub fn applied_theme(dom: &dyn DomEffects) -> Theme {
    if dom.part_has_class(DocumentPart::Root, "dark") {
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved theme, or the system preference when nothing valid is saved.
    pub fn theme(&self, system_prefers_dark: bool) -> Theme {
        match self.store.get(THEME_KEY).as_deref().and_then(Theme::parse) {
            Some(theme) => theme,
            None if system_prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
    }

    /// Apply the saved (or system) theme on page load.
    pub fn initialize_theme(&self, dom: &dyn DomEffects, system_prefers_dark: bool) -> Theme {
        let theme = self.theme(system_prefers_dark);
        apply_theme(dom, theme);
        theme
    }

    /// Flip the applied theme and remember the choice.
    pub fn toggle_theme(&self, dom: &dyn DomEffects) -> Theme {
        let theme = applied_theme(dom).toggled();
        apply_theme(dom, theme);
        self.set_theme(theme);
        tracing::info!("Theme toggled to: {}", theme.as_str());
        theme
    }

    pub fn bookmarks(&self) -> Vec<String> {
        self.read_list(BOOKMARKS_KEY)
    }

    pub fn is_bookmarked(&self, module_id: &str) -> bool {
        self.bookmarks().iter().any(|id| id == module_id)
    }

    /// Add or remove a bookmark. Returns whether the module is now bookmarked.
    pub fn toggle_bookmark(&self, module_id: &str) -> bool {
        let mut bookmarks = self.bookmarks();
        let bookmarked = match bookmarks.iter().position(|id| id == module_id) {
            Some(pos) => {
                bookmarks.remove(pos);
                false
            }
            None => {
                bookmarks.push(module_id.to_string());
                true
            }
        };
        self.write_list(BOOKMARKS_KEY, &bookmarks);
        bookmarked
    }

    pub fn completed_modules(&self) -> Vec<String> {
        self.read_list(COMPLETED_KEY)
    }

    pub fn is_completed(&self, module_id: &str) -> bool {
        self.completed_modules().iter().any(|id| id == module_id)
    }

    /// Returns false if the module was already completed.
    pub fn mark_completed(&self, module_id: &str) -> bool {
        let mut completed = self.completed_modules();
        if completed.iter().any(|id| id == module_id) {
            return false;
        }
        completed.push(module_id.to_string());
        self.write_list(COMPLETED_KEY, &completed);
        true
    }

    fn read_list(&self, key: &str) -> Vec<String> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Ignoring corrupt {} preference: {}", key, e);
                Vec::new()
            }
        }
    }

    fn write_list(&self, key: &str, list: &[String]) {
        match serde_json::to_string(list) {
            Ok(raw) => self.store.set(key, &raw),
            Err(e) => tracing::warn!("Could not save {} preference: {}", key, e),
        }
    }
}
