//! Value types shared by several resources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Money amount. `value` is a decimal string with the currency's precision,
/// e.g. `"2.00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    /// ISO-4217 code, e.g. `"RUB"`.
    pub currency: String,
}

impl Amount {
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
        }
    }

    pub fn rub(value: impl Into<String>) -> Self {
        Self::new(value, "RUB")
    }
}

/// Free-form key/value pairs attached by the merchant.
pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationType {
    Redirect,
    Embedded,
    External,
    MobileApplication,
    Qr,
    #[serde(other)]
    Unknown,
}

/// User confirmation scenario: what the caller asks for on create, and what
/// the API hands back (URL, token or QR data) on the payment object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(rename = "type")]
    pub kind: ConfirmationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_data: Option<String>,
}

impl Confirmation {
    /// Redirect scenario returning the buyer to `return_url`.
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Self {
            kind: ConfirmationType::Redirect,
            return_url: Some(return_url.into()),
            enforce: None,
            locale: None,
            confirmation_url: None,
            confirmation_token: None,
            confirmation_data: None,
        }
    }

    pub fn embedded() -> Self {
        Self {
            kind: ConfirmationType::Embedded,
            return_url: None,
            enforce: None,
            locale: None,
            confirmation_url: None,
            confirmation_token: None,
            confirmation_data: None,
        }
    }
}

/// Payee of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub gateway_id: String,
}

/// Who canceled an object and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    pub party: String,
    pub reason: String,
}

/// Payment method as reported on a payment. Method-specific fields
/// (`card`, `phone`, `login`, ...) stay in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub saved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Payment method data supplied when creating a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl PaymentMethodData {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            details: Map::new(),
        }
    }

    pub fn bank_card() -> Self {
        Self::new("bank_card")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptRegistration {
    Pending,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// Money split to another shop (marketplace transfers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub account_id: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmation_redirect_serializes_minimal() {
        let value = serde_json::to_value(Confirmation::redirect("https://x")).unwrap();
        assert_eq!(value, json!({"type": "redirect", "return_url": "https://x"}));
    }

    #[test]
    fn test_unknown_confirmation_type() {
        let c: Confirmation = serde_json::from_value(json!({"type": "sbp_push"})).unwrap();
        assert_eq!(c.kind, ConfirmationType::Unknown);
    }

    #[test]
    fn test_payment_method_keeps_details() {
        let method: PaymentMethod = serde_json::from_value(json!({
            "type": "bank_card",
            "id": "22e12f66-000f-5000-8000-18db351245c7",
            "saved": false,
            "card": {"last4": "4444", "expiry_month": "10"}
        }))
        .unwrap();
        assert_eq!(method.kind, "bank_card");
        assert_eq!(method.details["card"]["last4"], "4444");
    }
}
