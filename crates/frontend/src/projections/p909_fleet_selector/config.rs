use serde::Deserialize;
use std::time::Duration;

const DEFAULT_PAGE_SIZE: u32 = 200;
const DEFAULT_DEBOUNCE_MS: u64 = 150;
const DEFAULT_API_PATH: &str = "/api/p909/fleet";

/// Настройки страницы подбора техники
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FleetSelectorConfig {
    /// Размер страницы (строк за один запрос)
    pub page_size: u32,
    /// Задержка перед обновлением после изменения фильтра
    pub debounce_ms: u64,
    /// Путь API подбора техники
    pub api_path: String,
}

impl Default for FleetSelectorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            api_path: DEFAULT_API_PATH.to_string(),
        }
    }
}

impl FleetSelectorConfig {
    /// Разбирает JSON с переопределениями.
    /// При ошибке разбора возвращает настройки по умолчанию.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<FleetSelectorConfig>(raw) {
            Ok(config) => config.validated(),
            Err(e) => {
                log::warn!("Invalid fleet selector config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Нулевой размер страницы недопустим
    pub fn validated(mut self) -> Self {
        if self.page_size == 0 {
            log::warn!(
                "page_size must be positive, falling back to {}",
                DEFAULT_PAGE_SIZE
            );
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FleetSelectorConfig::default();
        assert_eq!(config.page_size, 200);
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.api_path, "/api/p909/fleet");
    }

    #[test]
    fn test_partial_override() {
        let config = FleetSelectorConfig::from_json(r#"{ "page_size": 50 }"#);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.debounce_ms, 150);
    }

    #[test]
    fn test_oversized_page_size_rejected() {
        assert_eq!(
            FleetSelectorConfig::from_json(r#"{ "page_size": 5000000000 }"#),
            FleetSelectorConfig::default()
        );
    }

    #[test]
    fn test_invalid_input_falls_back() {
        assert_eq!(
            FleetSelectorConfig::from_json("not json"),
            FleetSelectorConfig::default()
        );
        assert_eq!(
            FleetSelectorConfig::from_json(r#"{ "page_size": 0 }"#).page_size,
            200
        );
    }
}
