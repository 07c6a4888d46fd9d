//! Browser side of the theme controller: `localStorage` and the document root.

use leptos::prelude::*;

use casestats_view::theme::{DARK_CLASS, THEME_KEY, Theme, ThemeStore, ThemeSurface};

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// `localStorage`-backed preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageThemeStore;

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<String> {
        storage().and_then(|s| s.get_item(THEME_KEY).ok().flatten())
    }

    fn save(&self, theme: Theme) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(THEME_KEY, theme.as_str());
        }
    }
}

/// Toggles the `dark` class on `<html>` and drives the sun/moon icons.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSurface {
    pub is_dark: RwSignal<bool>,
}

impl ThemeSurface for DocumentSurface {
    fn apply(&self, theme: Theme) {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark());
        }
        self.is_dark.set(theme.is_dark());
    }
}

/// OS-level `prefers-color-scheme: dark`.
pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches())
}
