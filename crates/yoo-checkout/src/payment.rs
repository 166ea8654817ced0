use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{
    Amount, CancellationDetails, Confirmation, Metadata, PaymentMethod, PaymentMethodData,
    ReceiptRegistration, Recipient, Transfer,
};
use crate::receipt::ReceiptData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    WaitingForCapture,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// `succeeded` and `canceled` are final.
    pub fn is_final(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Canceled)
    }
}

/// Payment object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub status: PaymentStatus,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Recipient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    #[serde(default)]
    pub test: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Amount>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub refundable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_registration: Option<ReceiptRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<Transfer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePayment {
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Recipient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_data: Option<PaymentMethodData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_payment_method: Option<bool>,
    /// Capture automatically once the buyer confirms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<Transfer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
}

impl CreatePayment {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            description: None,
            receipt: None,
            recipient: None,
            payment_token: None,
            payment_method_id: None,
            payment_method_data: None,
            confirmation: None,
            save_payment_method: None,
            capture: None,
            client_ip: None,
            metadata: None,
            airline: None,
            transfers: Vec::new(),
            merchant_customer_id: None,
        }
    }

    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn with_payment_method_data(mut self, data: PaymentMethodData) -> Self {
        self.payment_method_data = Some(data);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Body of `POST /payments/{id}/capture`. An empty body captures the full
/// authorized amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturePayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<Transfer>,
}

impl CapturePayment {
    pub fn partial(amount: Amount) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_payment_skips_unset_fields() {
        let body = CreatePayment::new(Amount::rub("2.00"))
            .with_confirmation(Confirmation::redirect("https://x"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "amount": {"value": "2.00", "currency": "RUB"},
                "confirmation": {"type": "redirect", "return_url": "https://x"}
            })
        );
    }

    #[test]
    fn test_empty_capture_body() {
        assert_eq!(
            serde_json::to_value(CapturePayment::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_status_wire_names() {
        let status: PaymentStatus = serde_json::from_value(json!("waiting_for_capture")).unwrap();
        assert_eq!(status, PaymentStatus::WaitingForCapture);
        assert!(!status.is_final());
        let unknown: PaymentStatus = serde_json::from_value(json!("expired")).unwrap();
        assert_eq!(unknown, PaymentStatus::Unknown);
    }
}
