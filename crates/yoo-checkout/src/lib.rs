//! Client for the YooKassa payment API.
//!
//! Covers payments, refunds, receipts, webhooks and shop info. The client
//! takes care of the parts every call shares: Basic-Auth or OAuth Bearer
//! credentials, `Idempotence-Key` headers on mutating calls, list filters,
//! and mapping raw JSON into typed objects or a normalized [`ApiError`].
//!
//! # Layers
//!
//! - **Credentials** ([`Credentials`]): Basic-Auth for payments, refunds and
//!   receipts; Bearer for webhooks and `/me`
//! - **Filters** ([`Filter`], [`build_query`]): ordered query strings with
//!   comparison modes (`created_at.gte=...`)
//! - **Factories** ([`factory`]): raw JSON to domain objects, and every
//!   failure to [`ApiError`]
//! - **Dispatcher** ([`YooCheckout`]): one method per API operation over a
//!   pluggable [`Transport`]
//!
//! # Quick example
//!
//! ```no_run
//! use yoo_checkout::{CheckoutConfig, Filter, YooCheckout};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), yoo_checkout::ApiError> {
//! let checkout = YooCheckout::new(CheckoutConfig::new("123456", "test_secret"))?;
//!
//! let page = checkout
//!     .get_payment_list(Some(
//!         &Filter::new()
//!             .gte("created_at", "2021-01-27T13:58:02.977Z")
//!             .limit(20),
//!     ))
//!     .await?;
//! for payment in &page {
//!     println!("{} {:?}", payment.id, payment.status);
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod common;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod idempotency;
pub mod response;

// API resources
pub mod payment;
pub mod receipt;
pub mod refund;
pub mod shop;
pub mod webhook;

// Request pipeline
pub mod client;
pub mod factory;
pub mod http_client;
pub mod transport;

// Re-exports
pub use common::*;
pub use config::CheckoutConfig;
pub use constants::*;
pub use credentials::{AuthStrategy, BasicAuth, Credentials, RequestAuth};
pub use error::ApiError;
pub use filter::{build_query, normalize_filter, Filter, FilterMode, FilterValue};
pub use idempotency::IdempotenceKey;
pub use payment::*;
pub use receipt::*;
pub use refund::*;
pub use response::ListResponse;
pub use shop::*;
pub use webhook::*;

pub use client::YooCheckout;
pub use factory::{error_factory, Failure};
pub use http_client::ReqwestTransport;
pub use transport::{ApiRequest, HttpMethod, Transport, TransportFailure};
