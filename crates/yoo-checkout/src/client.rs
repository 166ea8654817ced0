//! Operation dispatcher.
//!
//! Each public method looks up its [`Operation`] in the static table below,
//! which fixes the HTTP method, the auth strategy and whether an
//! idempotency key is sent. All of them then run through [`YooCheckout::execute`]:
//! resolve auth (a missing OAuth token fails here, before any request),
//! attach the key, send, and hand the result to a factory.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::CheckoutConfig;
use crate::constants::{SHOP_TOKEN_REQUIRED, WEBHOOK_TOKEN_REQUIRED};
use crate::credentials::{AuthStrategy, BasicAuth, Credentials};
use crate::error::ApiError;
use crate::factory::{
    error_factory, list_factory, payment_factory, receipt_factory, refund_factory, shop_factory,
    webhook_factory,
};
use crate::filter::{build_query, normalize_filter, Filter};
use crate::http_client::ReqwestTransport;
use crate::idempotency::IdempotenceKey;
use crate::payment::{CapturePayment, CreatePayment, Payment};
use crate::receipt::{CreateReceipt, Receipt};
use crate::refund::{CreateRefund, Refund};
use crate::response::ListResponse;
use crate::shop::Shop;
use crate::transport::{ApiRequest, HttpMethod, Transport};
use crate::webhook::{CreateWebhook, Webhook};

/// Static description of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    pub auth: AuthStrategy,
    /// Send an `Idempotence-Key` header.
    pub idempotent: bool,
    /// Error description when a Bearer operation has no token.
    pub missing_token: &'static str,
}

impl Operation {
    const fn basic(name: &'static str, method: HttpMethod, idempotent: bool) -> Self {
        Self {
            name,
            method,
            auth: AuthStrategy::Basic,
            idempotent,
            missing_token: "",
        }
    }

    const fn bearer(
        name: &'static str,
        method: HttpMethod,
        idempotent: bool,
        missing_token: &'static str,
    ) -> Self {
        Self {
            name,
            method,
            auth: AuthStrategy::Bearer,
            idempotent,
            missing_token,
        }
    }
}

pub const CREATE_PAYMENT: Operation = Operation::basic("create_payment", HttpMethod::Post, true);
pub const GET_PAYMENT: Operation = Operation::basic("get_payment", HttpMethod::Get, false);
pub const CAPTURE_PAYMENT: Operation =
    Operation::basic("capture_payment", HttpMethod::Post, true);
pub const CANCEL_PAYMENT: Operation = Operation::basic("cancel_payment", HttpMethod::Post, true);
pub const LIST_PAYMENTS: Operation = Operation::basic("get_payment_list", HttpMethod::Get, false);

pub const CREATE_REFUND: Operation = Operation::basic("create_refund", HttpMethod::Post, true);
pub const GET_REFUND: Operation = Operation::basic("get_refund", HttpMethod::Get, false);
pub const LIST_REFUNDS: Operation = Operation::basic("get_refund_list", HttpMethod::Get, false);

pub const CREATE_RECEIPT: Operation = Operation::basic("create_receipt", HttpMethod::Post, true);
pub const GET_RECEIPT: Operation = Operation::basic("get_receipt", HttpMethod::Get, false);
pub const LIST_RECEIPTS: Operation = Operation::basic("get_receipt_list", HttpMethod::Get, false);

pub const CREATE_WEBHOOK: Operation = Operation::bearer(
    "create_webhook",
    HttpMethod::Post,
    true,
    WEBHOOK_TOKEN_REQUIRED,
);
pub const LIST_WEBHOOKS: Operation = Operation::bearer(
    "get_webhook_list",
    HttpMethod::Get,
    false,
    WEBHOOK_TOKEN_REQUIRED,
);
pub const DELETE_WEBHOOK: Operation = Operation::bearer(
    "delete_webhook",
    HttpMethod::Delete,
    false,
    WEBHOOK_TOKEN_REQUIRED,
);

pub const GET_SHOP: Operation =
    Operation::bearer("get_shop", HttpMethod::Get, false, SHOP_TOKEN_REQUIRED);

fn to_body<B: Serialize>(payload: &B) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(ApiError::invalid_request)
}

/// YooKassa API client.
///
/// Holds immutable configuration and credentials; calls are independent of
/// each other and can run concurrently.
///
/// ```no_run
/// use yoo_checkout::{Amount, CheckoutConfig, Confirmation, CreatePayment, YooCheckout};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), yoo_checkout::ApiError> {
/// let checkout = YooCheckout::new(CheckoutConfig::new("123456", "test_secret"))?;
/// let payment = checkout
///     .create_payment(
///         &CreatePayment::new(Amount::rub("2.00"))
///             .with_confirmation(Confirmation::redirect("https://example.com/return")),
///         None,
///     )
///     .await?;
/// println!("{} is {:?}", payment.id, payment.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct YooCheckout<T: Transport = ReqwestTransport> {
    config: CheckoutConfig,
    credentials: Credentials,
    transport: T,
}

impl YooCheckout<ReqwestTransport> {
    /// Client using [`ReqwestTransport`] with the configured timeout.
    pub fn new(config: CheckoutConfig) -> Result<Self, ApiError> {
        let transport =
            ReqwestTransport::new(config.timeout).map_err(ApiError::invalid_request)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> YooCheckout<T> {
    pub fn with_transport(config: CheckoutConfig, transport: T) -> Self {
        let credentials = config.credentials();
        Self {
            config,
            credentials,
            transport,
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Basic-Auth pair used for payment, refund and receipt calls.
    pub fn auth_data(&self) -> BasicAuth {
        self.credentials.auth_data()
    }

    async fn execute(
        &self,
        op: &Operation,
        path: &str,
        body: Option<Value>,
        idempotence_key: Option<&str>,
    ) -> Result<Value, ApiError> {
        let auth = self.credentials.authorize(op.auth, op.missing_token)?;
        let idempotence_key = op
            .idempotent
            .then(|| IdempotenceKey::resolve(idempotence_key).into_string());

        tracing::debug!(
            operation = op.name,
            method = %op.method,
            path = %path,
            "dispatching request"
        );
        if self.config.debug {
            if let Some(ref body) = body {
                tracing::debug!(operation = op.name, body = %body, "request body");
            }
        }

        let request = ApiRequest {
            method: op.method,
            url: format!("{}{}", self.config.api_root, path),
            body,
            auth,
            idempotence_key,
        };

        match self.transport.send(request).await {
            Ok(data) => {
                if self.config.debug {
                    tracing::debug!(operation = op.name, body = %data, "response body");
                }
                Ok(data)
            }
            Err(failure) => {
                let err = error_factory(failure);
                tracing::warn!(
                    operation = op.name,
                    code = %err.code,
                    error_code = err.error_code,
                    "request failed"
                );
                Err(err)
            }
        }
    }

    fn list_path(base: &str, filters: Option<&Filter>) -> String {
        let filter = normalize_filter(filters);
        format!("{base}{}", build_query(&filter))
    }

    // Payments

    /// `POST /payments`. Generates an idempotency key unless one is given.
    pub async fn create_payment(
        &self,
        payload: &CreatePayment,
        idempotence_key: Option<&str>,
    ) -> Result<Payment, ApiError> {
        let data = self
            .execute(
                &CREATE_PAYMENT,
                "/payments",
                Some(to_body(payload)?),
                idempotence_key,
            )
            .await?;
        payment_factory(data)
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment, ApiError> {
        let data = self
            .execute(&GET_PAYMENT, &format!("/payments/{payment_id}"), None, None)
            .await?;
        payment_factory(data)
    }

    /// Confirm a `waiting_for_capture` payment, fully or partially.
    pub async fn capture_payment(
        &self,
        payment_id: &str,
        payload: &CapturePayment,
        idempotence_key: Option<&str>,
    ) -> Result<Payment, ApiError> {
        let data = self
            .execute(
                &CAPTURE_PAYMENT,
                &format!("/payments/{payment_id}/capture"),
                Some(to_body(payload)?),
                idempotence_key,
            )
            .await?;
        payment_factory(data)
    }

    pub async fn cancel_payment(
        &self,
        payment_id: &str,
        idempotence_key: Option<&str>,
    ) -> Result<Payment, ApiError> {
        let data = self
            .execute(
                &CANCEL_PAYMENT,
                &format!("/payments/{payment_id}/cancel"),
                Some(json!({})),
                idempotence_key,
            )
            .await?;
        payment_factory(data)
    }

    pub async fn get_payment_list(
        &self,
        filters: Option<&Filter>,
    ) -> Result<ListResponse<Payment>, ApiError> {
        let path = Self::list_path("/payments", filters);
        let data = self.execute(&LIST_PAYMENTS, &path, None, None).await?;
        list_factory(data, payment_factory)
    }

    // Refunds

    pub async fn create_refund(
        &self,
        payload: &CreateRefund,
        idempotence_key: Option<&str>,
    ) -> Result<Refund, ApiError> {
        let data = self
            .execute(
                &CREATE_REFUND,
                "/refunds",
                Some(to_body(payload)?),
                idempotence_key,
            )
            .await?;
        refund_factory(data)
    }

    pub async fn get_refund(&self, refund_id: &str) -> Result<Refund, ApiError> {
        let data = self
            .execute(&GET_REFUND, &format!("/refunds/{refund_id}"), None, None)
            .await?;
        refund_factory(data)
    }

    pub async fn get_refund_list(
        &self,
        filters: Option<&Filter>,
    ) -> Result<ListResponse<Refund>, ApiError> {
        let path = Self::list_path("/refunds", filters);
        let data = self.execute(&LIST_REFUNDS, &path, None, None).await?;
        list_factory(data, refund_factory)
    }

    // Receipts

    pub async fn create_receipt(
        &self,
        payload: &CreateReceipt,
        idempotence_key: Option<&str>,
    ) -> Result<Receipt, ApiError> {
        let data = self
            .execute(
                &CREATE_RECEIPT,
                "/receipts",
                Some(to_body(payload)?),
                idempotence_key,
            )
            .await?;
        receipt_factory(data)
    }

    pub async fn get_receipt(&self, receipt_id: &str) -> Result<Receipt, ApiError> {
        let data = self
            .execute(&GET_RECEIPT, &format!("/receipts/{receipt_id}"), None, None)
            .await?;
        receipt_factory(data)
    }

    pub async fn get_receipt_list(
        &self,
        filters: Option<&Filter>,
    ) -> Result<ListResponse<Receipt>, ApiError> {
        let path = Self::list_path("/receipts", filters);
        let data = self.execute(&LIST_RECEIPTS, &path, None, None).await?;
        list_factory(data, receipt_factory)
    }

    // Webhooks (OAuth token only)

    pub async fn create_webhook(
        &self,
        payload: &CreateWebhook,
        idempotence_key: Option<&str>,
    ) -> Result<Webhook, ApiError> {
        let data = self
            .execute(
                &CREATE_WEBHOOK,
                "/webhooks",
                Some(to_body(payload)?),
                idempotence_key,
            )
            .await?;
        webhook_factory(data)
    }

    pub async fn get_webhook_list(&self) -> Result<ListResponse<Webhook>, ApiError> {
        let data = self.execute(&LIST_WEBHOOKS, "/webhooks", None, None).await?;
        list_factory(data, webhook_factory)
    }

    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<(), ApiError> {
        self.execute(
            &DELETE_WEBHOOK,
            &format!("/webhooks/{webhook_id}"),
            None,
            None,
        )
        .await?;
        Ok(())
    }

    // Shop (OAuth token only)

    pub async fn get_shop(&self) -> Result<Shop, ApiError> {
        let data = self.execute(&GET_SHOP, "/me", None, None).await?;
        shop_factory(data)
    }
}
