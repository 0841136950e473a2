//! Фасеты: допустимые значения фильтров с учётом остальных выбранных фильтров.
//!
//! Списки значений каждый раз строятся заново из ответа сервера, после чего
//! выбор пользователя согласуется с ними: значение, которого больше нет в
//! списке, сбрасывается в "All".

use super::api::FleetBackend;
use super::error::ApiError;
use super::filters::{FilterDimension, FleetFilters};
use contracts::projections::p909_fleet_selector::dto::{FleetFacetRequest, FleetFacetResponse};
use serde_json::{Number, Value};

pub const WILDCARD_LABEL: &str = "All";

/// Вариант выпадающего списка
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn wildcard() -> Self {
        Self::new(WILDCARD_LABEL, "")
    }
}

/// Списки вариантов по всем измерениям
#[derive(Debug, Clone, PartialEq)]
pub struct FacetOptions {
    pub warehouses: Vec<SelectOption>,
    pub snd_locations: Vec<SelectOption>,
    pub widths: Vec<SelectOption>,
    pub lengths: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub types: Vec<SelectOption>,
    /// Фиксированный список, сервер его не присылает
    pub wip: Vec<SelectOption>,
}

impl Default for FacetOptions {
    fn default() -> Self {
        Self {
            warehouses: vec![SelectOption::wildcard()],
            snd_locations: vec![SelectOption::wildcard()],
            widths: vec![SelectOption::wildcard()],
            lengths: vec![SelectOption::wildcard()],
            categories: vec![SelectOption::wildcard()],
            types: vec![SelectOption::wildcard()],
            wip: wip_options(),
        }
    }
}

impl FacetOptions {
    pub fn from_response(resp: FleetFacetResponse) -> Self {
        Self {
            warehouses: to_options(resp.warehouses),
            snd_locations: to_options(resp.snd_locations),
            widths: to_options(resp.widths),
            lengths: to_options(resp.lengths),
            categories: to_options(resp.categories),
            types: to_options(resp.types),
            wip: wip_options(),
        }
    }

    pub fn options(&self, dim: FilterDimension) -> &[SelectOption] {
        match dim {
            FilterDimension::Warehouse => &self.warehouses,
            FilterDimension::SndLocation => &self.snd_locations,
            FilterDimension::AssetWidth => &self.widths,
            FilterDimension::AssetLength => &self.lengths,
            FilterDimension::Category => &self.categories,
            FilterDimension::Type => &self.types,
            FilterDimension::WipFilter => &self.wip,
        }
    }

    pub fn contains(&self, dim: FilterDimension, value: &str) -> bool {
        value.is_empty() || self.options(dim).iter().any(|o| o.value == value)
    }
}

fn wip_options() -> Vec<SelectOption> {
    vec![
        SelectOption::wildcard(),
        SelectOption::new("Yes", "Yes"),
        SelectOption::new("No", "No"),
    ]
}

fn to_options(values: Option<Vec<Value>>) -> Vec<SelectOption> {
    let values = values.unwrap_or_default();
    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(SelectOption::wildcard());
    options.extend(
        values
            .iter()
            .filter_map(value_text)
            .map(|text| SelectOption::new(text.clone(), text)),
    );
    options
}

/// Текст значения фасета или ячейки; `null` — нет значения
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

// 12.0 отображается как "12", чтобы совпадать со значениями в строках таблицы
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

pub fn facet_request(selection: &FleetFilters) -> FleetFacetRequest {
    FleetFacetRequest {
        criteria: selection.to_criteria(),
    }
}

/// Один запрос фасетов по текущему выбору
pub async fn fetch_facets<B: FleetBackend>(
    backend: &B,
    selection: &FleetFilters,
) -> Result<FacetOptions, ApiError> {
    let resp = backend.fetch_facets(&facet_request(selection)).await?;
    Ok(FacetOptions::from_response(resp))
}

/// Сбрасывает выбор, которого нет в новых списках.
/// Возвращает сброшенные измерения.
pub fn reconcile(filters: &mut FleetFilters, options: &FacetOptions) -> Vec<FilterDimension> {
    let mut cleared = Vec::new();
    for dim in FilterDimension::ALL {
        if !options.contains(dim, filters.get(dim)) {
            log::debug!(
                "Filter {:?} = '{}' is no longer available, resetting",
                dim,
                filters.get(dim)
            );
            filters.clear(dim);
            cleared.push(dim);
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_options_prefixed_with_wildcard() {
        let options = FacetOptions::from_response(FleetFacetResponse {
            warehouses: Some(vec![json!("W1"), json!("W2")]),
            ..Default::default()
        });

        assert_eq!(options.warehouses[0], SelectOption::new("All", ""));
        assert_eq!(values(&options.warehouses), vec!["", "W1", "W2"]);
        assert_eq!(values(&options.categories), vec![""]);
        assert_eq!(values(&options.wip), vec!["", "Yes", "No"]);
    }

    #[test]
    fn test_numeric_facet_values() {
        let options = FacetOptions::from_response(FleetFacetResponse {
            widths: Some(vec![json!(12), json!(12.5), json!(8.0), json!("10"), Value::Null]),
            ..Default::default()
        });
        assert_eq!(values(&options.widths), vec!["", "12", "12.5", "8", "10"]);
    }

    #[test]
    fn test_reconcile_clears_missing_value() {
        let options = FacetOptions::from_response(FleetFacetResponse {
            warehouses: Some(vec![json!("W1")]),
            categories: Some(vec![json!("A"), json!("B")]),
            ..Default::default()
        });

        let mut filters = FleetFilters::default();
        filters.set(FilterDimension::Warehouse, "W1");
        filters.set(FilterDimension::Category, "C");

        let cleared = reconcile(&mut filters, &options);

        assert_eq!(cleared, vec![FilterDimension::Category]);
        assert_eq!(filters.category, "");
        assert_eq!(filters.warehouse, "W1");
    }

    #[test]
    fn test_reconcile_keeps_present_values() {
        let options = FacetOptions::from_response(FleetFacetResponse {
            categories: Some(vec![json!("A"), json!("B")]),
            widths: Some(vec![json!(12)]),
            ..Default::default()
        });

        let mut filters = FleetFilters::default();
        filters.set(FilterDimension::Category, "B");
        filters.set(FilterDimension::AssetWidth, "12");
        filters.set(FilterDimension::WipFilter, "No");
        let before = filters.clone();

        assert!(reconcile(&mut filters, &options).is_empty());
        assert_eq!(filters, before);
    }

    #[test]
    fn test_reconcile_unknown_wip_value() {
        let mut filters = FleetFilters::default();
        filters.set(FilterDimension::WipFilter, "Maybe");

        let cleared = reconcile(&mut filters, &FacetOptions::default());
        assert_eq!(cleared, vec![FilterDimension::WipFilter]);
        assert_eq!(filters.wip_filter, "");
    }
}
