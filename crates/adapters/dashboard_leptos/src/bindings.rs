//! Reactive state of the page and its implementations of the view-model traits.

use leptos::logging;
use leptos::prelude::*;

use casestats_domain::dashboard::DashboardData;
use casestats_domain::filter::CaseFilter;
use casestats_view::chart::ChartSlot;
use casestats_view::fetcher::{DashboardView, TriggerButton};
use casestats_view::registry::{CanvasLookup, ChartRegistry, RenderFailure};
use casestats_view::theme::{Palette, ThemeController};

use crate::canvas::PlottersCanvas;
use crate::theme::{DocumentSurface, LocalStorageThemeStore};

pub type PageTheme = ThemeController<LocalStorageThemeStore, DocumentSurface>;

/// The "apply filters" button.
#[derive(Debug, Clone, Copy)]
pub struct ButtonBinding {
    pub label: RwSignal<String>,
    pub disabled: RwSignal<bool>,
}

impl ButtonBinding {
    pub fn new(label: &str) -> Self {
        Self {
            label: RwSignal::new(label.to_string()),
            disabled: RwSignal::new(false),
        }
    }
}

impl TriggerButton for ButtonBinding {
    fn label(&self) -> String {
        self.label.get_untracked()
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get_untracked()
    }

    fn set_label(&self, label: &str) {
        self.label.set(label.to_string());
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

/// Handles to everything the fetcher and the theme toggle touch.
///
/// `Copy`, so it can be moved into any number of event handlers.
#[derive(Clone, Copy)]
pub struct ViewBindings {
    pub gender: RwSignal<String>,
    pub department: RwSignal<String>,
    /// Department options after the "all" placeholder.
    pub departments: RwSignal<Vec<String>>,
    pub totals: RwSignal<(u64, u64)>,
    pub apply: ButtonBinding,
    pub is_dark: RwSignal<bool>,
    pub theme: StoredValue<PageTheme, LocalStorage>,
    pub charts: StoredValue<ChartRegistry<PlottersCanvas>, LocalStorage>,
}

impl ViewBindings {
    pub fn new(theme: PageTheme, is_dark: RwSignal<bool>, apply_label: &str) -> Self {
        Self {
            gender: RwSignal::new(String::new()),
            department: RwSignal::new(String::new()),
            departments: RwSignal::new(Vec::new()),
            totals: RwSignal::new((0, 0)),
            apply: ButtonBinding::new(apply_label),
            is_dark,
            theme: StoredValue::new_local(theme),
            charts: StoredValue::new_local(ChartRegistry::new()),
        }
    }

    fn palette(&self) -> Palette {
        self.theme.with_value(PageTheme::palette)
    }

    /// Flip the theme and redraw live charts with its palette.
    pub fn toggle_theme(&self) {
        let Some(theme) = self.theme.try_update_value(PageTheme::toggle) else {
            return;
        };
        let palette = theme.palette();
        let failures = self
            .charts
            .try_update_value(|registry| registry.apply_palette(&palette))
            .unwrap_or_default();
        log_failures(&failures);
    }
}

fn log_failures(failures: &[RenderFailure<String>]) {
    for failure in failures {
        logging::error!("Error drawing {} chart: {}", failure.slot.name(), failure.error);
    }
}

impl CanvasLookup for ViewBindings {
    type Canvas = PlottersCanvas;

    fn canvas(&self, slot: ChartSlot) -> Option<PlottersCanvas> {
        PlottersCanvas::find(slot.canvas_id())
    }
}

impl DashboardView for ViewBindings {
    type Button = ButtonBinding;

    fn trigger(&self) -> Option<&ButtonBinding> {
        Some(&self.apply)
    }

    fn filter(&self) -> CaseFilter {
        CaseFilter::new()
            .gender(self.gender.get_untracked())
            .department(self.department.get_untracked())
    }

    fn department_option_count(&self) -> usize {
        self.departments.with_untracked(Vec::len)
    }

    fn add_department_options(&self, departments: &[String]) {
        self.departments
            .update(|options| options.extend_from_slice(departments));
    }

    fn set_totals(&self, total_cases: u64, total_deaths: u64) {
        self.totals.set((total_cases, total_deaths));
    }

    fn render_charts(&self, data: &DashboardData) {
        let palette = self.palette();
        let failures = self
            .charts
            .try_update_value(|registry| registry.render(data, &palette, self))
            .unwrap_or_default();
        log_failures(&failures);
    }
}
