//! Browser dashboard: theme toggle, filters, totals and five charts.

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

mod api;
mod bindings;
mod canvas;
mod components;
mod theme;

use api::GlooApi;
use bindings::ViewBindings;
use casestats_view::chart::ChartSlot;
use casestats_view::fetcher::{FetchOutcome, RequestSequence, fetch_data};
use casestats_view::theme::ThemeController;
use components::{ChartCard, FilterBar, StatCard, ThemeToggle};
use theme::{DocumentSurface, LocalStorageThemeStore, prefers_dark};

const APPLY_LABEL: &str = "Aplicar Filtros";

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let is_dark = RwSignal::new(false);
    let theme = ThemeController::init(
        LocalStorageThemeStore,
        DocumentSurface { is_dark },
        prefers_dark(),
    );
    let bindings = ViewBindings::new(theme, is_dark, APPLY_LABEL);
    let sequence = StoredValue::new(RequestSequence::new());

    let load = move || {
        let sequence = sequence.get_value();
        spawn_local(async move {
            match fetch_data(&bindings, &GlooApi, &sequence).await {
                FetchOutcome::Applied => {}
                FetchOutcome::Stale { path } => {
                    logging::debug_warn!("Discarding stale response for {path}");
                }
                FetchOutcome::Failed { path, error } => {
                    logging::error!("Error loading data from {path}: {error}");
                }
            }
        });
    };

    Effect::new(move |_| load());

    let total_cases = Signal::derive(move || bindings.totals.get().0);
    let total_deaths = Signal::derive(move || bindings.totals.get().1);

    view! {
        <header class="page-header">
            <h1>"Casos positivos"</h1>
            <ThemeToggle bindings=bindings/>
        </header>
        <main>
            <FilterBar bindings=bindings on_apply=Callback::new(move |()| load())/>
            <div class="stat-grid">
                <StatCard id="total-cases" label="Total de casos" value=total_cases/>
                <StatCard id="total-deaths" label="Total de fallecidos" value=total_deaths/>
            </div>
            <div class="chart-grid">
                {ChartSlot::ALL
                    .into_iter()
                    .map(|chart| view! { <ChartCard chart=chart/> })
                    .collect_view()}
            </div>
        </main>
    }
}
