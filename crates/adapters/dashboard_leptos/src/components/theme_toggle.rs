//! Dark/light theme toggle button.

use leptos::prelude::*;

use crate::bindings::ViewBindings;

/// Switches between light and dark themes and redraws the charts.
///
/// The sun icon shows while dark is active, the moon icon while light is.
#[component]
pub fn ThemeToggle(bindings: ViewBindings) -> impl IntoView {
    let is_dark = bindings.is_dark;

    view! {
        <button
            id="themeToggle"
            class="theme-toggle"
            title="Cambiar tema"
            on:click=move |_| bindings.toggle_theme()
        >
            <span id="sunIcon" class:hidden=move || !is_dark.get()>"\u{2600}"</span>
            <span id="moonIcon" class:hidden=move || is_dark.get()>"\u{263E}"</span>
        </button>
    }
}
