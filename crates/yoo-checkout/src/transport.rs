//! The seam between the client and whatever issues HTTP requests.
//!
//! [`YooCheckout`](crate::YooCheckout) builds an [`ApiRequest`] per call and
//! hands it to a [`Transport`]. The default is
//! [`ReqwestTransport`](crate::ReqwestTransport); tests plug in their own.

use serde_json::Value;

use crate::credentials::RequestAuth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully prepared request: absolute URL, auth and optional idempotency key.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub auth: RequestAuth,
    pub idempotence_key: Option<String>,
}

/// A request that did not produce a usable response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportFailure {
    /// HTTP status, `None` when no response arrived (DNS, TLS, timeout, ...).
    pub status: Option<u16>,
    /// Response body, when it was JSON.
    pub body: Option<Value>,
    pub message: String,
}

impl TransportFailure {
    pub fn http(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            body,
            message: format!("request failed with status code {status}"),
        }
    }

    /// A response arrived but its body could not be read or parsed.
    pub fn unreadable_body(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: None,
            message: message.into(),
        }
    }

    /// The status is 2xx, so the failure lies in the payload.
    pub fn is_success_status(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Issues one HTTP request and returns the JSON body of a successful
/// response (`Value::Null` for an empty body).
///
/// Implementations must not retry; a failed exchange is reported as a
/// [`TransportFailure`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<Value, TransportFailure>> + Send;
}
