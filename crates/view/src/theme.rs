//! Light/dark theme controller.
//!
//! The preference is persisted under a single storage key. When nothing is
//! stored, the operating-system preference decides.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;

/// Storage key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// CSS class set on the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

/// The two supported themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Pick the initial theme.
    ///
    /// A stored value wins: `"dark"` selects dark, anything else light.
    /// Without a stored value, `prefers_dark` (the OS preference) decides.
    #[must_use]
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored {
            Some(value) => value.parse().unwrap_or(Self::Light),
            None if prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value written to storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Chart colors for this theme.
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                text: Color::rgb(0x4B, 0x55, 0x63),
                grid: Color::rgb(0xE5, 0xE7, 0xEB),
            },
            Self::Dark => Palette {
                text: Color::rgb(0x9C, 0xA3, 0xAF),
                grid: Color::rgb(0x37, 0x41, 0x51),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Tick, legend and grid colors applied to every chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub grid: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Theme::default().palette()
    }
}

/// Persisted preference (browser `localStorage` in production).
pub trait ThemeStore {
    /// Stored value, if any.
    fn load(&self) -> Option<String>;

    /// Persist `theme`. Failures are ignored.
    fn save(&self, theme: Theme);
}

/// Visual state of the page: root class and sun/moon icons.
pub trait ThemeSurface {
    fn apply(&self, theme: Theme);
}

/// Owns the active theme plus the store and surface it is synchronised with.
pub struct ThemeController<S, D> {
    store: S,
    surface: D,
    current: Theme,
}

impl<S: ThemeStore, D: ThemeSurface> ThemeController<S, D> {
    /// Resolve the initial theme and apply it to `surface`.
    ///
    /// Nothing is persisted until the first [`toggle`](Self::toggle).
    pub fn init(store: S, surface: D, prefers_dark: bool) -> Self {
        let current = Theme::resolve(store.load().as_deref(), prefers_dark);
        surface.apply(current);
        Self {
            store,
            surface,
            current,
        }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.current.palette()
    }

    /// Flip the theme, apply it, persist it, and return the new one.
    ///
    /// Callers propagate `theme.palette()` to rendered charts.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.surface.apply(self.current);
        self.store.save(self.current);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore(Rc<RefCell<Option<String>>>);

    impl MemoryStore {
        fn with(value: &str) -> Self {
            Self(Rc::new(RefCell::new(Some(value.to_string()))))
        }

        fn value(&self) -> Option<String> {
            self.0.borrow().clone()
        }
    }

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.value()
        }

        fn save(&self, theme: Theme) {
            *self.0.borrow_mut() = Some(theme.as_str().to_string());
        }
    }

    /// Mirrors the DOM: root class list plus icon visibility.
    #[derive(Clone, Default)]
    struct FakeSurface(Rc<RefCell<SurfaceState>>);

    #[derive(Default)]
    struct SurfaceState {
        root_dark: bool,
        sun_visible: bool,
        moon_visible: bool,
        applied: usize,
    }

    impl ThemeSurface for FakeSurface {
        fn apply(&self, theme: Theme) {
            let mut state = self.0.borrow_mut();
            state.root_dark = theme.is_dark();
            state.sun_visible = theme.is_dark();
            state.moon_visible = !theme.is_dark();
            state.applied += 1;
        }
    }

    #[test]
    fn should_apply_dark_when_stored_dark() {
        let surface = FakeSurface::default();
        let ctrl = ThemeController::init(MemoryStore::with("dark"), surface.clone(), false);

        assert_eq!(ctrl.current(), Theme::Dark);
        let state = surface.0.borrow();
        assert!(state.root_dark);
        assert!(state.sun_visible);
        assert!(!state.moon_visible);
    }

    #[test]
    fn should_fall_back_to_os_preference_when_nothing_stored() {
        let surface = FakeSurface::default();
        let ctrl = ThemeController::init(MemoryStore::default(), surface.clone(), true);

        assert_eq!(ctrl.current(), Theme::Dark);
        assert!(surface.0.borrow().root_dark);
        assert!(surface.0.borrow().sun_visible);
    }

    #[test]
    fn should_prefer_stored_light_over_os_dark() {
        let ctrl = ThemeController::init(MemoryStore::with("light"), FakeSurface::default(), true);
        assert_eq!(ctrl.current(), Theme::Light);
    }

    #[test]
    fn should_treat_unknown_stored_value_as_light() {
        assert_eq!(Theme::resolve(Some("solarized"), true), Theme::Light);
    }

    #[test]
    fn should_not_persist_on_init() {
        let store = MemoryStore::default();
        let _ctrl = ThemeController::init(store.clone(), FakeSurface::default(), true);
        assert_eq!(store.value(), None);
    }

    #[test]
    fn should_persist_and_apply_on_toggle() {
        let store = MemoryStore::default();
        let surface = FakeSurface::default();
        let mut ctrl = ThemeController::init(store.clone(), surface.clone(), false);

        let theme = ctrl.toggle();

        assert_eq!(theme, Theme::Dark);
        assert_eq!(store.value().as_deref(), Some("dark"));
        assert!(surface.0.borrow().root_dark);
        assert_eq!(ctrl.palette(), Theme::Dark.palette());
    }

    #[test]
    fn should_return_to_original_after_two_toggles() {
        let store = MemoryStore::with("light");
        let surface = FakeSurface::default();
        let mut ctrl = ThemeController::init(store.clone(), surface.clone(), false);

        ctrl.toggle();
        ctrl.toggle();

        assert_eq!(ctrl.current(), Theme::Light);
        assert_eq!(store.value().as_deref(), Some("light"));
        let state = surface.0.borrow();
        assert!(!state.root_dark);
        assert!(state.moon_visible);
        assert_eq!(state.applied, 3);
    }

    #[test]
    fn should_use_distinct_palettes() {
        assert_eq!(Theme::Dark.palette().text, Color::rgb(0x9C, 0xA3, 0xAF));
        assert_eq!(Theme::Light.palette().grid, Color::rgb(0xE5, 0xE7, 0xEB));
    }
}
