use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::AUTHORIZATION_PARAMETER;

/// Normalized error returned by every client operation.
///
/// Built either from a failed HTTP exchange (see
/// [`error_factory`](crate::factory::error_factory)) or locally, before any
/// request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code} ({error_code}): {description}")]
pub struct ApiError {
    pub id: String,
    pub code: String,
    /// HTTP status, or 500 for failures raised inside the client.
    pub error_code: u16,
    pub description: String,
    pub parameter: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ApiError {
    /// A Bearer-only operation was called without an OAuth token.
    pub fn auth_configuration(description: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: "Internal error".to_string(),
            error_code: 500,
            description: description.to_string(),
            parameter: AUTHORIZATION_PARAMETER.to_string(),
            kind: "Internal".to_string(),
        }
    }

    /// The API answered with a payload that does not fit the expected type.
    pub fn invalid_response(target: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: "invalid_response".to_string(),
            error_code: 500,
            description: format!("failed to parse {target}: {reason}"),
            parameter: target.to_string(),
            kind: "Internal".to_string(),
        }
    }

    /// The request could not be built (body serialization, HTTP client setup).
    pub fn invalid_request(reason: impl std::fmt::Display) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: "invalid_request".to_string(),
            error_code: 500,
            description: reason.to_string(),
            parameter: String::new(),
            kind: "Internal".to_string(),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.kind == "Internal"
    }
}
