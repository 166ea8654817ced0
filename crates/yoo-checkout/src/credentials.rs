//! Credential provider: Basic-Auth for the payment API, Bearer for OAuth-only
//! endpoints.

use base64::Engine;

use crate::error::ApiError;

/// How a given operation authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Shop id and secret key.
    Basic,
    /// OAuth token.
    Bearer,
}

/// Basic-Auth pair derived from the shop id and secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BasicAuth {
    /// `Authorization` header value: `Basic base64(username:password)`.
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

/// Authentication attached to one outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAuth {
    Basic(BasicAuth),
    /// Full header value, `Bearer <token>`.
    Bearer(String),
}

impl RequestAuth {
    pub fn header_value(&self) -> String {
        match self {
            RequestAuth::Basic(basic) => basic.header_value(),
            RequestAuth::Bearer(value) => value.clone(),
        }
    }
}

/// Shop credentials, read-only for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    shop_id: String,
    secret_key: String,
    token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Credentials {
    pub fn new(shop_id: String, secret_key: String, token: Option<String>) -> Self {
        Self {
            shop_id,
            secret_key,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Basic-Auth pair for payment, refund and receipt calls.
    pub fn auth_data(&self) -> BasicAuth {
        BasicAuth {
            username: self.shop_id.clone(),
            password: self.secret_key.clone(),
        }
    }

    /// `Bearer <token>`, or the configuration error carrying `description`
    /// when no token was supplied.
    pub fn bearer(&self, description: &str) -> Result<String, ApiError> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {token}"))
            .ok_or_else(|| ApiError::auth_configuration(description))
    }

    /// Resolve the request auth for a strategy.
    pub fn authorize(
        &self,
        strategy: AuthStrategy,
        description: &str,
    ) -> Result<RequestAuth, ApiError> {
        match strategy {
            AuthStrategy::Basic => Ok(RequestAuth::Basic(self.auth_data())),
            AuthStrategy::Bearer => self.bearer(description).map(RequestAuth::Bearer),
        }
    }
}
