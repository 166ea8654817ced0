/// Root of the YooKassa v3 REST API.
pub const API_URL: &str = "https://api.yookassa.ru/v3";

/// Request/response body logging is off unless asked for.
pub const DEFAULT_DEBUG: bool = false;

/// Per-request timeout used by [`ReqwestTransport`](crate::ReqwestTransport).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the idempotency key on mutating calls.
pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

/// Parameter name reported when a Bearer-only call has no OAuth token.
pub const AUTHORIZATION_PARAMETER: &str = "Authorization";

pub const WEBHOOK_TOKEN_REQUIRED: &str =
    "Web hook functionality is only available with an OAuth token";

pub const SHOP_TOKEN_REQUIRED: &str = "Shop information is only available with an OAuth token";
