//! Client configuration.
//!
//! Everything the client needs is passed in explicitly; nothing here reads
//! the process environment.

use std::time::Duration;

use crate::constants::{API_URL, DEFAULT_DEBUG, DEFAULT_TIMEOUT_SECS};
use crate::credentials::Credentials;

/// Runtime configuration for a [`YooCheckout`](crate::YooCheckout) client.
#[derive(Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Shop identifier, used as the Basic-Auth username.
    pub shop_id: String,
    /// Secret key, used as the Basic-Auth password.
    pub secret_key: String,
    /// OAuth token for webhook and shop-info calls.
    pub token: Option<String>,
    /// Log request and response bodies at `debug` level.
    pub debug: bool,
    /// API root every request path is appended to.
    pub api_root: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for CheckoutConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutConfig")
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("debug", &self.debug)
            .field("api_root", &self.api_root)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CheckoutConfig {
    /// Create a configuration with the production API root and defaults.
    pub fn new(shop_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            token: None,
            debug: DEFAULT_DEBUG,
            api_root: API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the API root. A trailing slash is dropped so paths join cleanly.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Credentials derived from this configuration.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.shop_id.clone(),
            self.secret_key.clone(),
            self.token.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::new("123", "live_secret");
        assert_eq!(config.api_root, API_URL);
        assert!(!config.debug);
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_api_root_trailing_slash_trimmed() {
        let config = CheckoutConfig::new("123", "s").with_api_root("http://localhost:8080/v3/");
        assert_eq!(config.api_root, "http://localhost:8080/v3");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = CheckoutConfig::new("123", "live_secret").with_token("oauth-token");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("123"));
        assert!(!rendered.contains("live_secret"));
        assert!(!rendered.contains("oauth-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
