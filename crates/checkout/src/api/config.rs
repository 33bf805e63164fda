use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the checkout API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, e.g. `"http://localhost:8080/api"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins `path` onto the base URL without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.url("/products"), "http://localhost:8080/api/products");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = ApiConfig::new("https://shop.example/api/").with_timeout(Duration::from_secs(3));
        assert_eq!(config.url("/orders"), "https://shop.example/api/orders");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
