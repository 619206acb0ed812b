use crate::domain::{
    errors::{FetchError, FetchResult},
    logging::{LogComponent, get_logger},
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// JSON-over-GET client rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct GlooHttpClient {
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl GlooHttpClient {
    pub fn new(base_url: &str) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers,
        }
    }

    /// Absolute URLs pass through; paths are joined to the base.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }

    pub async fn get(&self, endpoint: &str) -> FetchResult<String> {
        let url = self.url_for(endpoint);
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("GET {}", url));

        let mut request = Request::get(&url);
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("{}: {}", url, e)))?;

        if !HttpUtils::is_success_status(response.status()) {
            let error = FetchError::Http { status: response.status(), url };
            get_logger().warn(LogComponent::Infrastructure("HTTP"), &error.to_string());
            return Err(error);
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("{}: {}", url, e)))?;

        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            &format!("GET {} -> {} bytes", url, text.len()),
        );
        Ok(text)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> FetchResult<T> {
        let text = self.get(endpoint).await?;
        HttpUtils::parse_json(&text)
    }
}

impl Default for GlooHttpClient {
    fn default() -> Self {
        Self::new("")
    }
}

/// Helpers shared by the endpoint builders.
pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Appends parameters in the given order.
    pub fn build_url_with_params(base_url: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return base_url.to_string();
        }

        let query_string: String = params
            .iter()
            .map(|(key, value)| format!("{}={}", Self::url_encode(key), Self::url_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", base_url, query_string)
    }

    pub fn url_encode(input: &str) -> String {
        input
            .replace('%', "%25")
            .replace(' ', "%20")
            .replace('&', "%26")
            .replace('=', "%3D")
            .replace('?', "%3F")
            .replace('#', "%23")
            .replace('/', "%2F")
    }

    pub fn parse_json<T: DeserializeOwned>(text: &str) -> FetchResult<T> {
        serde_json::from_str(text).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_building_keeps_param_order() {
        let url = HttpUtils::build_url_with_params("/api/analysis/600519.SH", &[("period", "past_10_years"), ("lang", "zh")]);
        assert_eq!(url, "/api/analysis/600519.SH?period=past_10_years&lang=zh");
    }

    #[test]
    fn url_encoding() {
        assert_eq!(HttpUtils::url_encode("hello world"), "hello%20world");
        assert_eq!(HttpUtils::url_encode("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn relative_endpoints_join_the_base() {
        assert_eq!(GlooHttpClient::new("").url_for("/api/companies"), "/api/companies");
        assert_eq!(
            GlooHttpClient::new("http://localhost:8001/").url_for("api/companies"),
            "http://localhost:8001/api/companies"
        );
        assert_eq!(GlooHttpClient::default().url_for("https://cdn.example/x.json"), "https://cdn.example/x.json");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let result: FetchResult<serde_json::Value> = HttpUtils::parse_json("<html>");
        assert!(matches!(result, Err(FetchError::Parse(_))));
        assert!(HttpUtils::is_success_status(204));
        assert!(!HttpUtils::is_success_status(500));
    }
}
