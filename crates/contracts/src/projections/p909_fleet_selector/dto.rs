use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Критерии отбора техники, общие для запроса фасетов и запроса страницы.
///
/// Пустой фильтр ("All") передаётся как `null`, кроме `wipFilter`,
/// который в этом случае передаётся пустой строкой.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetFilterCriteria {
    pub warehouse: Option<String>,
    pub snd_location: Option<String>,
    pub asset_width: Option<f64>,
    pub asset_length: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub wip_filter: String,
}

/// Запрос допустимых значений фильтров (фасетов)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetFacetRequest {
    #[serde(flatten)]
    pub criteria: FleetFilterCriteria,
}

/// Ответ с допустимыми значениями по каждому измерению.
///
/// Любое поле может отсутствовать или быть `null` — это пустой список.
/// Значения ширины/длины приходят как числами, так и строками.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetFacetResponse {
    #[serde(default)]
    pub warehouses: Option<Vec<Value>>,
    #[serde(default)]
    pub snd_locations: Option<Vec<Value>>,
    #[serde(default)]
    pub widths: Option<Vec<Value>>,
    #[serde(default)]
    pub lengths: Option<Vec<Value>>,
    #[serde(default)]
    pub categories: Option<Vec<Value>>,
    #[serde(default)]
    pub types: Option<Vec<Value>>,
}

/// Запрос страницы результатов (page_number начинается с 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSearchRequest {
    #[serde(flatten)]
    pub criteria: FleetFilterCriteria,
    pub page_size: u32,
    pub page_number: u32,
}

/// Ответ со страницей записей и общим количеством по текущим фильтрам
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSearchResponse {
    #[serde(default)]
    pub records: Option<Vec<FleetRow>>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Строка таблицы техники. Только для отображения.
///
/// Ширина и длина, как и в фасетах, приходят числами или строками.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetRow {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Rental_Status__c", alias = "Rental_Status", default)]
    pub rental_status: Option<String>,
    #[serde(rename = "WIP_Asset__c", alias = "WIP_Asset", default)]
    pub wip_asset: bool,
    #[serde(rename = "Warehouse__c", alias = "Warehouse", default)]
    pub warehouse: Option<String>,
    #[serde(rename = "SND_Location__c", alias = "SND_Location", default)]
    pub snd_location: Option<String>,
    #[serde(rename = "Asset_Width__c", alias = "Asset_Width", default)]
    pub asset_width: Option<Value>,
    #[serde(rename = "Asset_Length__c", alias = "Asset_Length", default)]
    pub asset_length: Option<Value>,
    #[serde(rename = "Asset_Category__c", alias = "Asset_Category", default)]
    pub asset_category: Option<String>,
    #[serde(
        rename = "Complex_Serial_number__c",
        alias = "Complex_Serial_Number",
        default
    )]
    pub complex_serial_number: Option<String>,
    #[serde(rename = "Type__c", alias = "Type", default)]
    pub asset_type: Option<String>,
}

/// Элемент структурированной ошибки сервера
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    #[serde(default)]
    pub message: Option<String>,
}

/// Тело ошибки: либо список ошибок, либо один объект с `message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    List(Vec<ApiErrorItem>),
    Single(ApiErrorItem),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_wire_shape() {
        let req = FleetSearchRequest {
            criteria: FleetFilterCriteria {
                warehouse: Some("W1".to_string()),
                asset_width: Some(12.0),
                ..Default::default()
            },
            page_size: 200,
            page_number: 1,
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "warehouse": "W1",
                "sndLocation": null,
                "assetWidth": 12.0,
                "assetLength": null,
                "category": null,
                "type": null,
                "wipFilter": "",
                "pageSize": 200,
                "pageNumber": 1
            })
        );
    }

    #[test]
    fn test_facet_response_missing_fields() {
        let resp: FleetFacetResponse =
            serde_json::from_value(json!({ "warehouses": ["W1"], "widths": null })).unwrap();
        assert_eq!(resp.warehouses, Some(vec![json!("W1")]));
        assert!(resp.widths.is_none());
        assert!(resp.categories.is_none());
    }

    #[test]
    fn test_row_accepts_short_field_names() {
        let row: FleetRow = serde_json::from_value(json!({
            "Name": "A-100",
            "Rental_Status": "Available",
            "WIP_Asset__c": true,
            "Asset_Width__c": 8.5
        }))
        .unwrap();
        assert_eq!(row.name.as_deref(), Some("A-100"));
        assert_eq!(row.rental_status.as_deref(), Some("Available"));
        assert!(row.wip_asset);
        assert_eq!(row.asset_width, Some(json!(8.5)));
        assert!(row.warehouse.is_none());
    }

    #[test]
    fn test_row_dimensions_accept_strings() {
        let resp: FleetSearchResponse = serde_json::from_value(json!({
            "records": [
                { "Name": "A", "Asset_Width__c": "8.5", "Asset_Length__c": 40 },
                { "Name": "B", "Asset_Width__c": null }
            ],
            "total": 2
        }))
        .unwrap();

        let records = resp.records.unwrap();
        assert_eq!(records[0].asset_width, Some(json!("8.5")));
        assert_eq!(records[0].asset_length, Some(json!(40)));
        assert_eq!(records[1].asset_width, None);
        assert_eq!(resp.total, Some(2));
    }

    #[test]
    fn test_error_body_variants() {
        let list: ApiErrorBody =
            serde_json::from_value(json!([{ "message": "x" }, { "message": "y" }])).unwrap();
        assert!(matches!(list, ApiErrorBody::List(ref items) if items.len() == 2));

        let single: ApiErrorBody = serde_json::from_value(json!({ "message": "oops" })).unwrap();
        assert_eq!(
            single,
            ApiErrorBody::Single(ApiErrorItem {
                message: Some("oops".to_string())
            })
        );
    }
}
