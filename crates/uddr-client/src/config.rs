//! Client configuration types.

use std::time::Duration;

/// Public REST API base URL
pub const DEFAULT_API_URL: &str = "https://ddr.ultradns.com/api/protect/ext";

/// Private REST API base URL (account, decision, category)
pub const DEFAULT_PRIVATE_API_URL: &str = "https://api.ddr.ultradns.com";

/// DNS-over-HTTPS resolver base URL
pub const DEFAULT_DOH_URL: &str = "https://rcsv.ddr.ultradns.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URLs of the three services a client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Public REST API
    pub api: String,

    /// Private REST API
    pub private_api: String,

    /// DNS-over-HTTPS resolver
    pub doh: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: DEFAULT_API_URL.to_string(),
            private_api: DEFAULT_PRIVATE_API_URL.to_string(),
            doh: DEFAULT_DOH_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point all three services under one base, as `{base}/api`,
    /// `{base}/private` and `{base}/doh`. Mostly useful for tests.
    #[must_use]
    pub fn under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api: format!("{base}/api"),
            private_api: format!("{base}/private"),
            doh: format!("{base}/doh"),
        }
    }

    /// Set the public API base URL
    #[must_use]
    pub fn api(mut self, url: impl Into<String>) -> Self {
        self.api = url.into();
        self
    }

    /// Set the private API base URL
    #[must_use]
    pub fn private_api(mut self, url: impl Into<String>) -> Self {
        self.private_api = url.into();
        self
    }

    /// Set the DOH resolver base URL
    #[must_use]
    pub fn doh(mut self, url: impl Into<String>) -> Self {
        self.doh = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let e = Endpoints::default();
        assert_eq!(e.api, "https://ddr.ultradns.com/api/protect/ext");
        assert_eq!(e.private_api, "https://api.ddr.ultradns.com");
        assert_eq!(e.doh, "https://rcsv.ddr.ultradns.com");
    }

    #[test]
    fn test_under() {
        let e = Endpoints::under("http://127.0.0.1:8080/");
        assert_eq!(e.api, "http://127.0.0.1:8080/api");
        assert_eq!(e.private_api, "http://127.0.0.1:8080/private");
        assert_eq!(e.doh, "http://127.0.0.1:8080/doh");

        let e = e.doh("http://resolver.test");
        assert_eq!(e.doh, "http://resolver.test");
    }
}
