use serde::{Deserialize, Serialize};

/// Webhook subscription: the API calls `url` when `event` happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    /// Event name, e.g. `payment.succeeded` or `refund.succeeded`.
    pub event: String,
    pub url: String,
}

/// Body of `POST /webhooks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebhook {
    pub event: String,
    pub url: String,
}

impl CreateWebhook {
    pub fn new(event: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            url: url.into(),
        }
    }
}
