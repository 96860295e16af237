//! Payment gateway integration via REST API (no SDK dependency)
//!
//! The gateway order is created server-side before the client is sent
//! to checkout; verification later compares the gateway-reported
//! amount/currency/plan against the locally stored expected payment.
//! Only 5xx-class failures of these outbound calls are retried, with a
//! bounded exponential delay; business-rule failures surface at once.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use shared::error::{AppError, ErrorCode};
use std::time::Duration;

const MAX_RETRIES: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 500;
const MAX_RETRY_DELAY_MS: u64 = 8_000;

/// Order as reported by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    /// "created" | "paid" | "failed"
    pub status: String,
    /// Plan id echoed back from order creation
    #[serde(default)]
    pub plan_id: Option<String>,
}

/// Payment gateway REST client
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a gateway order for a plan purchase
    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        plan_id: &str,
    ) -> Result<GatewayOrder, AppError> {
        let url = format!("{}/v1/orders", self.base_url);
        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "notes": { "plan_id": plan_id },
        });
        send_with_retry("create_order", || {
            self.http
                .post(url.as_str())
                .basic_auth(&self.api_key, None::<&str>)
                .json(&body)
        })
        .await
    }

    /// Fetch the gateway's view of an order (used for verification)
    pub async fn fetch_order(&self, gateway_order_id: &str) -> Result<GatewayOrder, AppError> {
        let url = format!("{}/v1/orders/{gateway_order_id}", self.base_url);
        send_with_retry("fetch_order", || {
            self.http
                .get(url.as_str())
                .basic_auth(&self.api_key, None::<&str>)
        })
        .await
    }
}

/// Run a gateway call, retrying transport errors and 5xx responses
///
/// 4xx responses are the gateway telling us the request is wrong —
/// those fail immediately.
async fn send_with_retry(
    op: &str,
    build: impl Fn() -> reqwest::RequestBuilder,
) -> Result<GatewayOrder, AppError> {
    let mut delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS);

    for attempt in 0..MAX_RETRIES {
        let retryable = match build().send().await {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    return resp.json::<GatewayOrder>().await.map_err(|e| {
                        AppError::gateway(format!("Gateway returned invalid body: {e}"))
                    });
                }
                if status.is_server_error() {
                    tracing::warn!(op, status = %status, "Gateway 5xx response");
                    true
                } else {
                    let body = resp.text().await.unwrap_or_default();
                    tracing::warn!(op, status = %status, body = %body, "Gateway rejected request");
                    return Err(AppError::with_message(
                        ErrorCode::PaymentFailed,
                        format!("Gateway rejected {op}"),
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(op, error = %e, "Gateway transport error");
                true
            }
        };

        if retryable && attempt + 1 < MAX_RETRIES {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(Duration::from_millis(MAX_RETRY_DELAY_MS));
        }
    }

    Err(AppError::new(ErrorCode::GatewayError))
}

/// Verify a gateway webhook signature (HMAC-SHA256)
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
) -> Result<(), &'static str> {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    if timestamp.is_empty() || signature.is_empty() {
        return Err("Invalid signature header");
    }

    let signed_payload = format!("{timestamp}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(signed_payload.as_bytes());

    // Constant-time comparison via verify_slice
    let sig_bytes = hex::decode(signature).map_err(|_| "Invalid signature hex")?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| "Webhook signature mismatch")?;

    // Reject events older than 5 minutes to prevent replay attacks
    let ts: i64 = timestamp.parse().map_err(|_| "Invalid timestamp")?;
    let now = chrono::Utc::now().timestamp();
    if (now - ts).abs() > 300 {
        return Err("Webhook timestamp too old");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str, ts: i64) -> String {
        let signed = format!("{ts}.{}", std::str::from_utf8(payload).unwrap());
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed.as_bytes());
        let sig = hex::encode(mac.finalize().into_bytes());
        format!("t={ts},v1={sig}")
    }

    #[test]
    fn test_webhook_signature_valid() {
        let payload = br#"{"event":"payment.captured"}"#;
        let now = chrono::Utc::now().timestamp();
        let header = sign(payload, "whsec", now);
        assert!(verify_webhook_signature(payload, &header, "whsec").is_ok());
    }

    #[test]
    fn test_webhook_signature_wrong_secret() {
        let payload = b"{}";
        let now = chrono::Utc::now().timestamp();
        let header = sign(payload, "whsec", now);
        assert!(verify_webhook_signature(payload, &header, "other").is_err());
    }

    #[test]
    fn test_webhook_replay_rejected() {
        let payload = b"{}";
        let stale = chrono::Utc::now().timestamp() - 3600;
        let header = sign(payload, "whsec", stale);
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec"),
            Err("Webhook timestamp too old")
        );
    }

    #[test]
    fn test_webhook_malformed_header() {
        assert!(verify_webhook_signature(b"{}", "v1=abcd", "whsec").is_err());
        assert!(verify_webhook_signature(b"{}", "t=123", "whsec").is_err());
    }
}
