//! Fiscal receipts (54-FZ): the standalone receipt resource and the receipt
//! data embedded in payments and refunds.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::common::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    Payment,
    Refund,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Pending,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// Buyer contact details printed on the receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Item quantity. The API sends a JSON number (`5.000`); requests may use
/// either a number or a decimal string, and serialize back as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(Number),
    Text(String),
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Quantity::Text(value)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity::Number(value.into())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{n}"),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub description: String,
    pub quantity: Quantity,
    pub amount: Amount,
    pub vat_code: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin_code: Option<String>,
}

/// How the buyer settled: `cashless`, `prepayment`, `postpayment`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Amount,
}

/// Receipt data attached to a payment, capture or refund request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub items: Vec<ReceiptItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Receipt object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReceiptType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    pub status: ReceiptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_storage_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_provider_id: Option<String>,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settlements: Vec<Settlement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,
}

/// Body of `POST /receipts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReceipt {
    #[serde(rename = "type")]
    pub kind: ReceiptType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    pub customer: Customer,
    pub items: Vec<ReceiptItem>,
    /// Send the receipt to the buyer right away.
    pub send: bool,
    pub settlements: Vec<Settlement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_receipt_body() {
        let body = CreateReceipt {
            kind: ReceiptType::Refund,
            payment_id: None,
            refund_id: Some("27a387af-0015-5000-8000-137da144ce29".into()),
            customer: Customer {
                email: Some("test@gmail.com".into()),
                ..Customer::default()
            },
            items: vec![ReceiptItem {
                description: "test".into(),
                quantity: "2".into(),
                amount: Amount::rub("1.00"),
                vat_code: 1,
                payment_subject: None,
                payment_mode: None,
                product_code: None,
                country_of_origin_code: None,
            }],
            send: true,
            settlements: vec![Settlement {
                kind: "cashless".into(),
                amount: Amount::rub("2.00"),
            }],
            tax_system_code: None,
            on_behalf_of: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["type"], "refund");
        assert_eq!(value["customer"], json!({"email": "test@gmail.com"}));
        assert_eq!(value["items"][0]["vat_code"], 1);
        assert_eq!(value["settlements"][0]["type"], "cashless");
        assert!(value.get("payment_id").is_none());
    }

    #[test]
    fn test_receipt_from_api_payload() {
        let receipt: Receipt = serde_json::from_value(json!({
            "id": "rt_1da5c87d-0984-50e8-a7f3-8de646dd9ec9",
            "type": "payment",
            "payment_id": "215d8da0-000f-50be-b000-0003308c89be",
            "status": "succeeded",
            "fiscal_document_number": "3986",
            "registered_at": "2019-05-13T17:56:00.000Z",
            "items": []
        }))
        .unwrap();
        assert_eq!(receipt.kind, ReceiptType::Payment);
        assert_eq!(receipt.status, ReceiptStatus::Succeeded);
        assert!(receipt.registered_at.is_some());
    }

    #[test]
    fn test_numeric_quantity_from_api() {
        let receipt: Receipt = serde_json::from_value(json!({
            "id": "rt-2",
            "type": "payment",
            "status": "pending",
            "items": [{
                "description": "Tea",
                "quantity": 5.000,
                "amount": {"value": "250.00", "currency": "RUB"},
                "vat_code": 2
            }]
        }))
        .unwrap();
        assert!(matches!(receipt.items[0].quantity, Quantity::Number(_)));
        assert_eq!(receipt.items[0].quantity.to_string(), "5.0");
    }

    #[test]
    fn test_quantity_keeps_callers_form() {
        assert_eq!(serde_json::to_value(Quantity::from("1.5")).unwrap(), json!("1.5"));
        assert_eq!(serde_json::to_value(Quantity::from(3u32)).unwrap(), json!(3));
    }
}
