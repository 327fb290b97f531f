use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{config::Config, error::AppError};

type HmacSha256 = Hmac<Sha256>;

/// Client for the Razorpay-style orders API. Orders are created remotely;
/// nothing is persisted locally until the confirmation signature checks out.
pub struct PaymentGateway {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    api_url: String,
}

#[derive(Serialize)]
struct OrderPayload<'a> {
    /// Minor currency units (paise).
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
}

impl PaymentGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: config.razorpay_key_id.clone(),
            key_secret: config.razorpay_key_secret.clone(),
            api_url: config.razorpay_api_url.clone(),
        }
    }

    /// Create an order for the given rupee amount; returns the gateway's
    /// order id. The amount is converted to paise on the wire.
    pub async fn create_order(&self, amount: i64, receipt: &str) -> Result<String, AppError> {
        let payload = OrderPayload {
            amount: amount * 100,
            currency: "INR",
            receipt,
        };
        let resp = self
            .http
            .post(format!("{}/orders", self.api_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Gateway(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AppError::Gateway(format!(
                "order creation failed with status {}",
                resp.status()
            )));
        }

        let order: OrderResponse = resp
            .json()
            .await
            .map_err(|e| AppError::Gateway(e.to_string()))?;
        Ok(order.id)
    }

    /// True when the caller-supplied signature equals
    /// hex(HMAC-SHA256(secret, "orderId|paymentId")).
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        sign(&self.key_secret, order_id, payment_id) == signature
    }
}

pub fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(secret: &str) -> PaymentGateway {
        PaymentGateway {
            http: reqwest::Client::new(),
            key_id: "rzp_test_key".into(),
            key_secret: secret.into(),
            api_url: "http://localhost:0".into(),
        }
    }

    #[test]
    fn accepts_matching_signature() {
        let gw = gateway("shared-secret");
        let sig = sign("shared-secret", "order_123", "pay_456");
        assert!(gw.verify_signature("order_123", "pay_456", &sig));
    }

    #[test]
    fn rejects_tampered_order_or_payment() {
        let gw = gateway("shared-secret");
        let sig = sign("shared-secret", "order_123", "pay_456");
        assert!(!gw.verify_signature("order_999", "pay_456", &sig));
        assert!(!gw.verify_signature("order_123", "pay_999", &sig));
        assert!(!gw.verify_signature("order_123", "pay_456", "deadbeef"));
    }

    #[test]
    fn signature_depends_on_secret() {
        let a = sign("secret-a", "order_123", "pay_456");
        let b = sign("secret-b", "order_123", "pay_456");
        assert_ne!(a, b);
    }

    #[test]
    fn signature_is_hex_encoded_sha256() {
        let sig = sign("s", "o", "p");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
