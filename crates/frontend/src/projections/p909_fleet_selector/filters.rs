use contracts::projections::p909_fleet_selector::dto::FleetFilterCriteria;

/// Измерения, по которым фильтруется список техники
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Warehouse,
    SndLocation,
    AssetWidth,
    AssetLength,
    Category,
    Type,
    WipFilter,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 7] = [
        FilterDimension::Warehouse,
        FilterDimension::SndLocation,
        FilterDimension::AssetWidth,
        FilterDimension::AssetLength,
        FilterDimension::Category,
        FilterDimension::Type,
        FilterDimension::WipFilter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Warehouse => "Warehouse",
            FilterDimension::SndLocation => "SND Location",
            FilterDimension::AssetWidth => "Asset Width",
            FilterDimension::AssetLength => "Asset Length",
            FilterDimension::Category => "Asset Category",
            FilterDimension::Type => "Type",
            FilterDimension::WipFilter => "WIP Asset",
        }
    }
}

/// Текущий выбор по всем фильтрам.
///
/// Значения хранятся "как есть" из выпадающих списков: пустая строка = "All".
/// Проверка на допустимость выполняется только при согласовании с фасетами.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetFilters {
    pub warehouse: String,
    pub snd_location: String,
    pub asset_width: String,
    pub asset_length: String,
    pub category: String,
    pub asset_type: String,
    pub wip_filter: String,
}

impl FleetFilters {
    pub fn get(&self, dim: FilterDimension) -> &str {
        match dim {
            FilterDimension::Warehouse => &self.warehouse,
            FilterDimension::SndLocation => &self.snd_location,
            FilterDimension::AssetWidth => &self.asset_width,
            FilterDimension::AssetLength => &self.asset_length,
            FilterDimension::Category => &self.category,
            FilterDimension::Type => &self.asset_type,
            FilterDimension::WipFilter => &self.wip_filter,
        }
    }

    pub fn set(&mut self, dim: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        match dim {
            FilterDimension::Warehouse => self.warehouse = value,
            FilterDimension::SndLocation => self.snd_location = value,
            FilterDimension::AssetWidth => self.asset_width = value,
            FilterDimension::AssetLength => self.asset_length = value,
            FilterDimension::Category => self.category = value,
            FilterDimension::Type => self.asset_type = value,
            FilterDimension::WipFilter => self.wip_filter = value,
        }
    }

    pub fn clear(&mut self, dim: FilterDimension) {
        self.set(dim, String::new());
    }

    pub fn active_count(&self) -> usize {
        FilterDimension::ALL
            .iter()
            .filter(|dim| !self.get(**dim).is_empty())
            .count()
    }

    /// Критерии для сервера: пустые строки → `null`, ширина/длина → числа
    pub fn to_criteria(&self) -> FleetFilterCriteria {
        FleetFilterCriteria {
            warehouse: non_empty(&self.warehouse),
            snd_location: non_empty(&self.snd_location),
            asset_width: parse_number(&self.asset_width),
            asset_length: parse_number(&self.asset_length),
            category: non_empty(&self.category),
            asset_type: non_empty(&self.asset_type),
            wip_filter: self.wip_filter.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_stores_raw_value() {
        let mut filters = FleetFilters::default();
        filters.set(FilterDimension::Category, "not-validated-yet");
        assert_eq!(filters.get(FilterDimension::Category), "not-validated-yet");
        assert_eq!(filters.active_count(), 1);

        filters.clear(FilterDimension::Category);
        assert_eq!(filters.get(FilterDimension::Category), "");
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn test_to_criteria_wildcards() {
        let criteria = FleetFilters::default().to_criteria();
        assert_eq!(criteria.warehouse, None);
        assert_eq!(criteria.asset_width, None);
        assert_eq!(criteria.asset_type, None);
        assert_eq!(criteria.wip_filter, "");
    }

    #[test]
    fn test_to_criteria_numeric_coercion() {
        let mut filters = FleetFilters::default();
        filters.set(FilterDimension::AssetWidth, "12");
        filters.set(FilterDimension::AssetLength, "abc");
        filters.set(FilterDimension::Type, "Trailer");
        filters.set(FilterDimension::WipFilter, "Yes");

        let criteria = filters.to_criteria();
        assert_eq!(criteria.asset_width, Some(12.0));
        assert_eq!(criteria.asset_length, None);
        assert_eq!(criteria.asset_type.as_deref(), Some("Trailer"));
        assert_eq!(criteria.wip_filter, "Yes");
    }
}
