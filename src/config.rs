use crate::domain::{errors::ConfigError, logging::LogLevel};
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Runtime settings, optionally overridden by an inline JSON block:
/// `<script id="dashboard-config" type="application/json">{...}</script>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    pub period: String,
    pub spec_path: String,
    pub definitions_path: String,
    pub search_limit: usize,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            period: "past_10_years".to_string(),
            spec_path: "/data/indicators_specification_with_prefix.json".to_string(),
            definitions_path: "/data/definitions/indicators_standard-corrected".to_string(),
            search_limit: 10,
            log_level: LogLevel::Debug,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_period(mut self, period: &str) -> Self {
        self.period = period.to_string();
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Reads the inline config block, if the page has one.
    #[cfg(target_arch = "wasm32")]
    pub fn from_document() -> Option<Result<Self, ConfigError>> {
        let text = web_sys::window()?
            .document()?
            .get_element_by_id(CONFIG_ELEMENT_ID)?
            .text_content()?;
        Some(Self::from_json(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{"api_base":"http://localhost:8001","log_level":"info"}"#).unwrap();
        assert_eq!(config.api_base, "http://localhost:8001");
        assert_eq!(config.period, "past_10_years");
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn builders_override_defaults() {
        let config = DashboardConfig::default().with_period("past_3_years").with_log_level(LogLevel::Warn);
        assert_eq!(config.period, "past_3_years");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = DashboardConfig::from_json("{").unwrap_err();
        assert!(err.to_string().starts_with("Invalid dashboard config"));
    }
}
