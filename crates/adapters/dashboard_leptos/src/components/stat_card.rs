//! Stat card component for displaying a labelled counter.

use leptos::prelude::*;

use casestats_view::format::format_count;

/// A card displaying a label and a thousands-separated count.
#[component]
pub fn StatCard(
    /// DOM id of the value element.
    id: &'static str,
    /// The label shown above the value.
    #[prop(into)]
    label: String,
    /// The count to display.
    #[prop(into)]
    value: Signal<u64>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-label">{label}</span>
            <span class="stat-value" id=id>{move || format_count(value.get())}</span>
        </div>
    }
}
