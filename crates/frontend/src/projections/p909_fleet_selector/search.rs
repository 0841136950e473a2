use super::api::FleetBackend;
use super::error::ApiError;
use super::filters::FleetFilters;
use super::paging::PageRequest;
use contracts::projections::p909_fleet_selector::dto::{FleetRow, FleetSearchRequest};

/// Страница результатов и общее количество записей по фильтрам
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBatch<R> {
    pub records: Vec<R>,
    pub total: usize,
}

pub fn search_request(selection: &FleetFilters, page: PageRequest) -> FleetSearchRequest {
    FleetSearchRequest {
        criteria: selection.to_criteria(),
        page_size: page.page_size,
        page_number: page.page_number,
    }
}

/// Запрос одной страницы. Курсор здесь не меняется.
pub async fn fetch_page<B: FleetBackend>(
    backend: &B,
    selection: &FleetFilters,
    page: PageRequest,
) -> Result<PageBatch<FleetRow>, ApiError> {
    let resp = backend
        .search_fleet(&search_request(selection, page))
        .await?;

    Ok(PageBatch {
        records: resp.records.unwrap_or_default(),
        total: resp
            .total
            .map_or(0, |t| usize::try_from(t).unwrap_or(usize::MAX)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::p909_fleet_selector::filters::FilterDimension;

    #[test]
    fn test_search_request_carries_cursor() {
        let mut filters = FleetFilters::default();
        filters.set(FilterDimension::Warehouse, "W1");
        filters.set(FilterDimension::AssetLength, "40");

        let req = search_request(
            &filters,
            PageRequest {
                page_size: 200,
                page_number: 3,
            },
        );

        assert_eq!(req.page_size, 200);
        assert_eq!(req.page_number, 3);
        assert_eq!(req.criteria.warehouse.as_deref(), Some("W1"));
        assert_eq!(req.criteria.asset_length, Some(40.0));
        assert_eq!(req.criteria.category, None);
    }
}
