mod filter_select;

use crate::projections::p909_fleet_selector::api::{GlooClock, HttpFleetBackend};
use crate::projections::p909_fleet_selector::config::FleetSelectorConfig;
use crate::projections::p909_fleet_selector::controller::{
    FleetObserver, FleetSelector, FleetSnapshot, Notification, Severity,
};
use crate::projections::p909_fleet_selector::facets::value_text;
use crate::projections::p909_fleet_selector::filters::FilterDimension;
use crate::shared::api_utils::api_url;
use contracts::projections::p909_fleet_selector::dto::FleetRow;
use filter_select::FilterSelect;
use leptos::logging::log;
use leptos::prelude::*;
use serde_json::Value;
use std::rc::Rc;
use thaw::*;

type Selector = FleetSelector<HttpFleetBackend, GlooClock>;

const COLUMNS: [&str; 10] = [
    "Name",
    "Rental Status",
    "WIP Asset",
    "Warehouse",
    "SND Location",
    "Asset Width",
    "Asset Length",
    "Asset Category",
    "Complex Serial Number",
    "Type",
];

/// Передаёт состояние контроллера в сигналы
struct SignalObserver {
    snapshot: RwSignal<FleetSnapshot, LocalStorage>,
    notification: RwSignal<Option<Notification>>,
}

impl FleetObserver for SignalObserver {
    fn state_changed(&self, snapshot: &FleetSnapshot) {
        self.snapshot.set(snapshot.clone());
    }

    fn notify(&self, notification: Notification) {
        self.notification.set(Some(notification));
    }
}

fn fmt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn fmt_value(value: &Option<Value>) -> String {
    value
        .as_ref()
        .and_then(value_text)
        .unwrap_or_else(|| "—".to_string())
}

fn row_view(row: FleetRow) -> impl IntoView {
    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout truncate=true>
                    {fmt_text(&row.name)}
                </TableCellLayout>
            </TableCell>
            <TableCell>{fmt_text(&row.rental_status)}</TableCell>
            <TableCell>{if row.wip_asset { "✓" } else { "" }}</TableCell>
            <TableCell>{fmt_text(&row.warehouse)}</TableCell>
            <TableCell>{fmt_text(&row.snd_location)}</TableCell>
            <TableCell class="text-right">{fmt_value(&row.asset_width)}</TableCell>
            <TableCell class="text-right">{fmt_value(&row.asset_length)}</TableCell>
            <TableCell>{fmt_text(&row.asset_category)}</TableCell>
            <TableCell>{fmt_text(&row.complex_serial_number)}</TableCell>
            <TableCell>{fmt_text(&row.asset_type)}</TableCell>
        </TableRow>
    }
}

#[component]
pub fn FleetSelectorList(
    /// Переопределение настроек (размер страницы, задержка, путь API)
    #[prop(optional)]
    config: Option<FleetSelectorConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default().validated();

    let snapshot = RwSignal::new_local(FleetSnapshot::empty(config.page_size));
    let notification = RwSignal::new(Option::<Notification>::None);

    let observer = Rc::new(SignalObserver {
        snapshot,
        notification,
    });
    let backend = HttpFleetBackend::new(api_url(&config.api_path));
    let selector: Rc<Selector> = Rc::new(FleetSelector::new(backend, GlooClock, config, observer));
    let selector = StoredValue::new_local(selector);

    // Initial load
    Effect::new(move |_| {
        let sel = selector.get_value();
        leptos::task::spawn_local(async move {
            let outcome = sel.refresh().await;
            log!("Fleet selector initial load: {:?}", outcome);
        });
    });

    let on_filter_change = move |dim: FilterDimension, value: String| {
        let sel = selector.get_value();
        leptos::task::spawn_local(async move {
            sel.filter_changed(dim, value).await;
        });
    };

    let refresh = move || {
        let sel = selector.get_value();
        leptos::task::spawn_local(async move {
            sel.refresh().await;
        });
    };

    let load_more = move || {
        let sel = selector.get_value();
        leptos::task::spawn_local(async move {
            sel.load_more().await;
        });
    };

    let is_loading = Signal::derive(move || snapshot.with(|s| s.is_loading));
    let is_table_loading = Signal::derive(move || snapshot.with(|s| s.is_table_loading));
    let can_load_more = Signal::derive(move || {
        snapshot.with(|s| s.cursor.has_more && !s.is_loading && !s.is_table_loading)
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Подбор техники"</h1>
                    <span class="badge badge--primary">
                        {move || snapshot.with(|s| {
                            format!("{} / {}", s.cursor.loaded_count, s.cursor.total_count)
                        })}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| refresh()
                        disabled=is_loading
                    >
                        {move || if is_loading.get() { "Загрузка..." } else { "Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <span class="filter-panel__title">"Фильтры"</span>
                            {move || {
                                let count = snapshot.with(|s| s.filters.active_count());
                                if count > 0 {
                                    view! {
                                        <span class="filter-panel__badge">{count}</span>
                                    }.into_any()
                                } else {
                                    view! { <></> }.into_any()
                                }
                            }}
                        </div>
                    </div>
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            {FilterDimension::ALL.into_iter().map(|dim| {
                                view! {
                                    <FilterSelect
                                        label=dim.label()
                                        value=Signal::derive(move || {
                                            snapshot.with(|s| s.filters.get(dim).to_string())
                                        })
                                        options=Signal::derive(move || {
                                            snapshot.with(|s| s.options.options(dim).to_vec())
                                        })
                                        on_change=Callback::new(move |value: String| {
                                            on_filter_change(dim, value)
                                        })
                                    />
                                }
                            }).collect_view()}
                        </Flex>
                    </div>
                </div>

                // Notification
                {move || {
                    notification.get().map(|n| {
                        let class = match n.severity {
                            Severity::Error => "alert alert--error",
                            Severity::Info => "alert alert--info",
                        };
                        view! {
                            <div class=class on:click=move |_| notification.set(None)>
                                <strong>{n.title}</strong>
                                {format!(": {}", n.message)}
                            </div>
                        }
                    })
                }}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {COLUMNS.into_iter().map(|title| view! {
                                    <TableHeaderCell resizable=true min_width=120.0>
                                        {title}
                                    </TableHeaderCell>
                                }).collect_view()}
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            // строки только дописываются, поэтому ключ (поколение, индекс)
                            // перерисовывает лишь новые строки
                            <For
                                each=move || snapshot.with(|s| {
                                    let generation = s.generation;
                                    (0..s.rows.len()).map(move |i| (generation, i))
                                })
                                key=|key| *key
                                children=move |(_, i)| {
                                    snapshot
                                        .with_untracked(|s| s.rows.get(i).cloned())
                                        .map(row_view)
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <div class="table-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_more()
                        disabled=Signal::derive(move || !can_load_more.get())
                    >
                        {move || {
                            if is_table_loading.get() {
                                "Загрузка...".to_string()
                            } else if snapshot.with(|s| s.cursor.has_more) {
                                "Загрузить ещё".to_string()
                            } else {
                                "Все записи загружены".to_string()
                            }
                        }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(&Some(json!(12.0))), "12");
        assert_eq!(fmt_value(&Some(json!(8.5))), "8.5");
        assert_eq!(fmt_value(&Some(json!("8.5"))), "8.5");
        assert_eq!(fmt_value(&Some(Value::Null)), "—");
        assert_eq!(fmt_value(&None), "—");
    }
}
