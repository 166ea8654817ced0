use std::time::Duration;

use serde_json::Value;

use crate::constants::IDEMPOTENCE_KEY_HEADER;
use crate::transport::{ApiRequest, HttpMethod, Transport, TransportFailure};

/// [`Transport`] backed by `reqwest::Client`.
///
/// Sends the `Authorization` header the request carries (Basic or Bearer),
/// the `Idempotence-Key` header when present, and the body as JSON. Any
/// non-2xx status is returned as a [`TransportFailure`] with the parsed
/// error body.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http })
    }

    /// Create a transport with a custom reqwest::Client.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportFailure> {
        let mut req = self
            .http
            .request(reqwest_method(request.method), &request.url)
            .header(reqwest::header::AUTHORIZATION, request.auth.header_value());

        if let Some(ref key) = request.idempotence_key {
            req = req.header(IDEMPOTENCE_KEY_HEADER, key);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TransportFailure::network(format!("request failed: {e}")))?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| {
            TransportFailure::unreadable_body(
                status.as_u16(),
                format!("failed to read response body: {e}"),
            )
        })?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            return Err(TransportFailure::http(status.as_u16(), body));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            TransportFailure::unreadable_body(status.as_u16(), e.to_string())
        })
    }
}
