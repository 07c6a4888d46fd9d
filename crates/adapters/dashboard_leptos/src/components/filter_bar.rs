//! Gender and department selectors plus the apply button.

use leptos::prelude::*;

use crate::bindings::ViewBindings;

/// Gender codes offered by the selector, with their labels.
const GENDERS: [(&str, &str); 2] = [("F", "Femenino"), ("M", "Masculino")];

/// Filter selectors bound to `bindings`; `on_apply` runs on click.
///
/// Department options come from `bindings.departments`, filled by the first
/// successful load.
#[component]
pub fn FilterBar(bindings: ViewBindings, on_apply: Callback<()>) -> impl IntoView {
    let button = bindings.apply;

    view! {
        <div class="filter-bar">
            <label>
                "Sexo"
                <select
                    id="genderFilter"
                    prop:value=move || bindings.gender.get()
                    on:change=move |ev| bindings.gender.set(event_target_value(&ev))
                >
                    <option value="">"Todos"</option>
                    {GENDERS
                        .into_iter()
                        .map(|(code, label)| view! { <option value=code>{label}</option> })
                        .collect_view()}
                </select>
            </label>
            <label>
                "Departamento"
                <select
                    id="departmentFilter"
                    prop:value=move || bindings.department.get()
                    on:change=move |ev| bindings.department.set(event_target_value(&ev))
                >
                    <option value="">"Todos"</option>
                    <For
                        each=move || bindings.departments.get()
                        key=|name| name.clone()
                        children=|name: String| {
                            let value = name.clone();
                            view! { <option value=value>{name}</option> }
                        }
                    />
                </select>
            </label>
            <button
                id="applyFilters"
                class="btn btn-primary"
                prop:disabled=move || button.disabled.get()
                on:click=move |_| on_apply.run(())
            >
                {move || button.label.get()}
            </button>
        </div>
    }
}
