use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Amount, CancellationDetails, ReceiptRegistration};
use crate::receipt::ReceiptData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// Part of a refund returned from a specific marketplace account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundSource {
    pub account_id: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee_amount: Option<Amount>,
}

/// Refund object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub id: String,
    pub payment_id: String,
    pub status: RefundStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_registration: Option<ReceiptRegistration>,
    pub created_at: DateTime<Utc>,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<RefundSource>,
}

/// Body of `POST /refunds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRefund {
    pub payment_id: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<RefundSource>,
}

impl CreateRefund {
    pub fn new(payment_id: impl Into<String>, amount: Amount) -> Self {
        Self {
            payment_id: payment_id.into(),
            amount,
            description: None,
            receipt: None,
            sources: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
