use std::time::Duration;

use url::Url;
use yoo_checkout::{CheckoutConfig, API_URL, DEFAULT_TIMEOUT_SECS};

/// CLI settings, read from the environment (and `.env`).
#[derive(Clone)]
pub struct CliConfig {
    pub shop_id: String,
    pub secret_key: String,
    /// OAuth token for webhook and shop calls (None = Basic-Auth only)
    pub token: Option<String>,
    pub api_url: String,
    pub debug: bool,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("debug", &self.debug)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CliConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

        // Required: shop credentials
        let shop_id = var("YOOKASSA_SHOP_ID").ok_or(ConfigError::MissingRequired("YOOKASSA_SHOP_ID"))?;
        let secret_key =
            var("YOOKASSA_SECRET_KEY").ok_or(ConfigError::MissingRequired("YOOKASSA_SECRET_KEY"))?;

        // Optional: OAuth token
        let token = var("YOOKASSA_TOKEN");

        // Optional: API root
        let api_url = var("YOOKASSA_API_URL").unwrap_or_else(|| API_URL.to_string());
        Url::parse(&api_url).map_err(|_| ConfigError::InvalidUrl(api_url.clone()))?;

        let debug = var("YOOKASSA_DEBUG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let timeout_secs = match var("YOOKASSA_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("YOOKASSA_TIMEOUT_SECS", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            shop_id,
            secret_key,
            token,
            api_url,
            debug,
            timeout_secs,
        })
    }

    /// Notice to log once tracing is up, when Bearer-only commands cannot work.
    pub fn token_notice(&self) -> Option<&'static str> {
        self.token
            .is_none()
            .then_some("YOOKASSA_TOKEN not set; webhook and shop commands will fail")
    }

    pub fn checkout_config(&self) -> CheckoutConfig {
        let config = CheckoutConfig::new(self.shop_id.clone(), self.secret_key.clone())
            .with_api_root(self.api_url.clone())
            .with_debug(self.debug)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match self.token {
            Some(ref token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid number in {0}: {1}")]
    InvalidNumber(&'static str, String),
}
