use crate::projections::p909_fleet_selector::ui::list::FleetSelectorList;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <FleetSelectorList />
    }
}
