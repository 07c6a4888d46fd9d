//! Titled card holding one chart canvas.

use leptos::prelude::*;

use casestats_view::chart::ChartSlot;

#[component]
pub fn ChartCard(chart: ChartSlot) -> impl IntoView {
    view! {
        <div class="chart-card">
            <h3>{chart.title()}</h3>
            <canvas id=chart.canvas_id() width="640" height="320"></canvas>
        </div>
    }
}
