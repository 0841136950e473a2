use crate::projections::p909_fleet_selector::facets::SelectOption;
use leptos::prelude::*;

/// Выпадающий список фильтра. Варианты приходят из фасетов.
#[component]
pub fn FilterSelect(
    /// Подпись над списком
    label: &'static str,
    /// Текущее значение ("" = All)
    #[prop(into)]
    value: Signal<String>,
    /// Варианты, первым всегда идёт "All"
    #[prop(into)]
    options: Signal<Vec<SelectOption>>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form__group" style="width: 180px;">
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <For
                    each=move || options.get()
                    key=|opt| opt.value.clone()
                    children=move |opt| {
                        let val = opt.value.clone();
                        let is_selected = move || value.get() == val;
                        view! {
                            <option value=opt.value selected=is_selected>
                                {opt.label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
