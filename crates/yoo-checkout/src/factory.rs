//! Response factories: raw API JSON in, typed objects (or [`ApiError`]) out.
//!
//! Every payload the API returns passes through exactly one of these
//! functions, and every failure passes through [`error_factory`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::payment::Payment;
use crate::receipt::Receipt;
use crate::refund::Refund;
use crate::response::ListResponse;
use crate::shop::Shop;
use crate::transport::TransportFailure;
use crate::webhook::Webhook;

const UNKNOWN_ID: &str = "unknown";
const UNKNOWN_CODE: &str = "unknown_error";
const DEFAULT_ERROR_TYPE: &str = "error";
const INTERNAL_STATUS: u16 = 500;

/// Failure reaching the error factory.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Already an [`ApiError`]; passed through unchanged.
    Normalized(ApiError),
    /// Raw HTTP failure, still to be normalized.
    Transport(TransportFailure),
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        Failure::Normalized(err)
    }
}

impl From<TransportFailure> for Failure {
    fn from(failure: TransportFailure) -> Self {
        Failure::Transport(failure)
    }
}

/// Normalize a failure into an [`ApiError`].
///
/// A transport failure is read from the YooKassa error body
/// (`id`, `code`, `description`, `parameter`, `type`); absent fields fall
/// back to fixed placeholders and the HTTP status becomes `error_code`
/// (500 when no response arrived). A failure carrying a 2xx status means the
/// body was unusable and becomes an `invalid_response` error.
pub fn error_factory(failure: impl Into<Failure>) -> ApiError {
    match failure.into() {
        Failure::Normalized(err) => err,
        // A 2xx whose body could not be read or parsed is a bad payload, not a remote error.
        Failure::Transport(failure) if failure.is_success_status() => {
            ApiError::invalid_response("response body", &failure.message)
        }
        Failure::Transport(failure) => {
            let body = failure.body.as_ref().and_then(Value::as_object);
            let field = |name: &str| {
                body.and_then(|b| b.get(name))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            ApiError {
                id: field("id").unwrap_or_else(|| UNKNOWN_ID.to_string()),
                code: field("code").unwrap_or_else(|| UNKNOWN_CODE.to_string()),
                error_code: failure.status.unwrap_or(INTERNAL_STATUS),
                description: field("description").unwrap_or_else(|| failure.message.clone()),
                parameter: field("parameter").unwrap_or_default(),
                kind: field("type").unwrap_or_else(|| DEFAULT_ERROR_TYPE.to_string()),
            }
        }
    }
}

fn from_raw<T: DeserializeOwned>(raw: Value, target: &str) -> Result<T, ApiError> {
    serde_json::from_value(raw).map_err(|e| ApiError::invalid_response(target, e))
}

pub fn payment_factory(raw: Value) -> Result<Payment, ApiError> {
    from_raw(raw, "Payment")
}

pub fn refund_factory(raw: Value) -> Result<Refund, ApiError> {
    from_raw(raw, "Refund")
}

pub fn receipt_factory(raw: Value) -> Result<Receipt, ApiError> {
    from_raw(raw, "Receipt")
}

pub fn webhook_factory(raw: Value) -> Result<Webhook, ApiError> {
    from_raw(raw, "Webhook")
}

pub fn shop_factory(raw: Value) -> Result<Shop, ApiError> {
    from_raw(raw, "Shop")
}

/// Map a list envelope: `items` through `factory`, everything else kept.
///
/// A missing `items` field is an empty page. A non-string `next_cursor`
/// is left in `extra` and the page reports no next cursor.
pub fn list_factory<T, F>(raw: Value, factory: F) -> Result<ListResponse<T>, ApiError>
where
    F: Fn(Value) -> Result<T, ApiError>,
{
    let mut envelope: Map<String, Value> = match raw {
        Value::Object(map) => map,
        other => {
            return Err(ApiError::invalid_response(
                "list",
                format!("expected an object, got {other}"),
            ))
        }
    };

    let items = match envelope.remove("items") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(factory)
            .collect::<Result<Vec<T>, ApiError>>()?,
        Some(other) => {
            return Err(ApiError::invalid_response(
                "list",
                format!("`items` is not an array: {other}"),
            ))
        }
    };

    // Only a string is a cursor; any other value stays in the envelope.
    let next_cursor = match envelope.remove("next_cursor") {
        Some(Value::String(cursor)) => Some(cursor),
        Some(other) => {
            envelope.insert("next_cursor".to_string(), other);
            None
        }
        None => None,
    };

    Ok(ListResponse {
        items,
        next_cursor,
        extra: envelope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentStatus;
    use serde_json::json;

    fn raw_payment(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "status": status,
            "paid": false,
            "amount": {"value": "2.00", "currency": "RUB"},
            "created_at": "2021-01-27T13:58:02.977Z",
            "test": true,
            "refundable": false,
            "metadata": {}
        })
    }

    #[test]
    fn test_payment_factory_maps_status() {
        let payment = payment_factory(raw_payment("p-1", "pending")).unwrap();
        assert_eq!(payment.id, "p-1");
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount.value, "2.00");
        assert!(payment.test);
    }

    #[test]
    fn test_payment_factory_rejects_bad_shape() {
        let err = payment_factory(json!({"id": "p-1"})).unwrap_err();
        assert_eq!(err.code, "invalid_response");
        assert_eq!(err.parameter, "Payment");
        assert!(err.is_internal());
    }

    #[test]
    fn test_list_factory_maps_items_and_keeps_envelope() {
        let raw = json!({
            "type": "list",
            "items": [raw_payment("p-1", "pending"), raw_payment("p-2", "succeeded")],
            "next_cursor": "x"
        });
        let list = list_factory(raw, payment_factory).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.items[0].id, "p-1");
        assert_eq!(list.items[1].status, PaymentStatus::Succeeded);
        assert_eq!(list.next_cursor.as_deref(), Some("x"));
        assert_eq!(list.extra.get("type"), Some(&json!("list")));
    }

    #[test]
    fn test_list_factory_keeps_non_string_cursor_in_envelope() {
        let raw = json!({"type": "list", "items": [], "next_cursor": null});
        let list = list_factory(raw, payment_factory).unwrap();
        assert!(!list.has_more());
        assert_eq!(list.extra.get("next_cursor"), Some(&Value::Null));

        let raw = json!({"items": [], "next_cursor": 42});
        let list = list_factory(raw, payment_factory).unwrap();
        assert_eq!(list.next_cursor, None);
        assert_eq!(list.extra.get("next_cursor"), Some(&json!(42)));
    }

    #[test]
    fn test_list_factory_without_items() {
        let list = list_factory(json!({"type": "list"}), webhook_factory).unwrap();
        assert!(list.is_empty());
        assert!(!list.has_more());
    }

    #[test]
    fn test_list_factory_fails_on_bad_item() {
        let raw = json!({"items": [raw_payment("p-1", "pending"), {"id": 5}]});
        assert!(list_factory(raw, payment_factory).is_err());
    }

    #[test]
    fn test_error_factory_passes_normalized_through() {
        let original = ApiError::auth_configuration("only available with an OAuth token");
        let again = error_factory(Failure::Normalized(original.clone()));
        assert_eq!(again, original);
        // Twice through is still the same error, not a wrapped one.
        assert_eq!(error_factory(again), original);
    }

    #[test]
    fn test_error_factory_reads_api_body() {
        let failure = TransportFailure::http(
            400,
            Some(json!({
                "type": "error",
                "id": "ab5a11cd-13cc-4e33-af8b-75a74e18dd09",
                "code": "invalid_request",
                "description": "Idempotence key duplicated",
                "parameter": "Idempotence-Key"
            })),
        );
        let err = error_factory(failure);
        assert_eq!(err.id, "ab5a11cd-13cc-4e33-af8b-75a74e18dd09");
        assert_eq!(err.code, "invalid_request");
        assert_eq!(err.error_code, 400);
        assert_eq!(err.description, "Idempotence key duplicated");
        assert_eq!(err.parameter, "Idempotence-Key");
        assert_eq!(err.kind, "error");
    }

    #[test]
    fn test_error_factory_placeholders() {
        let err = error_factory(TransportFailure::http(502, None));
        assert_eq!(err.id, "unknown");
        assert_eq!(err.code, "unknown_error");
        assert_eq!(err.error_code, 502);
        assert_eq!(err.description, "request failed with status code 502");
        assert_eq!(err.parameter, "");
        assert_eq!(err.kind, "error");
    }

    #[test]
    fn test_error_factory_network_failure() {
        let err = error_factory(TransportFailure::network("connection refused"));
        assert_eq!(err.error_code, 500);
        assert_eq!(err.description, "connection refused");
    }

    #[test]
    fn test_error_factory_unparsable_success_body() {
        let failure = TransportFailure::unreadable_body(200, "expected value at line 1 column 1");
        let err = error_factory(failure);
        assert_eq!(err.code, "invalid_response");
        assert_eq!(err.error_code, 500);
        assert_eq!(err.kind, "Internal");
        assert_eq!(err.parameter, "response body");
        assert!(err.description.contains("expected value"));
    }

    #[test]
    fn test_error_factory_unreadable_error_body_keeps_status() {
        let err = error_factory(TransportFailure::unreadable_body(502, "connection reset"));
        assert_eq!(err.error_code, 502);
        assert_eq!(err.code, "unknown_error");
    }

    #[test]
    fn test_receipt_factory_accepts_numeric_quantity() {
        let raw = json!({
            "id": "rt-1",
            "type": "payment",
            "payment_id": "215d8da0-000f-50be-b000-0003308c89be",
            "status": "succeeded",
            "items": [{
                "description": "Tea",
                "quantity": 5.000,
                "amount": {"value": "250.00", "currency": "RUB"},
                "vat_code": 2
            }]
        });
        let receipt = receipt_factory(raw.clone()).unwrap();
        assert_eq!(receipt.items.len(), 1);

        let list = list_factory(json!({"type": "list", "items": [raw]}), receipt_factory).unwrap();
        assert_eq!(list.items[0].items[0].description, "Tea");
    }
}
