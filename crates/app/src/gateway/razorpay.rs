//! Razorpay payment gateway client.

use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::gateway::{
    GatewayError, PaymentConfirmation, PaymentGateway, RemoteOrder, RemoteOrderRequest,
    verify_payment_signature,
};

/// Default Razorpay API address.
pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com";

/// Credentials and address for the Razorpay API.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id, used as the basic auth user.
    pub key_id: String,

    /// Key secret, used for basic auth and for payment signatures.
    pub key_secret: Zeroizing<String>,

    /// API address, e.g. `"https://api.razorpay.com"`.
    pub api_base: String,
}

impl RazorpayConfig {
    #[must_use]
    pub fn new(key_id: String, key_secret: String, api_base: Option<String>) -> Self {
        Self {
            key_id,
            key_secret: Zeroizing::new(key_secret),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_base.trim_end_matches('/'))
    }
}

impl fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"**redacted**")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// HTTP client for Razorpay order creation and signature checks.
#[derive(Debug, Clone)]
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http: Client,
}

impl RazorpayGateway {
    #[must_use]
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: u64,
    currency: &'a str,
    payment_capture: u8,
    notes: &'a BTreeMap<String, String>,
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_remote_order(
        &self,
        request: RemoteOrderRequest,
    ) -> Result<RemoteOrder, GatewayError> {
        let body = CreateOrderBody {
            amount: request.amount_minor,
            currency: &request.currency,
            payment_capture: 1,
            notes: &request.notes,
        };

        let response = self
            .http
            .post(self.config.orders_url())
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.as_str()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        parse_create_order_response(status, &text)
    }

    async fn verify_signature(&self, confirmation: &PaymentConfirmation) -> bool {
        verify_payment_signature(&self.config.key_secret, confirmation)
    }
}

fn parse_create_order_response(status: StatusCode, text: &str) -> Result<RemoteOrder, GatewayError> {
    if !status.is_success() {
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            body: text.to_string(),
        });
    }

    let raw: Value = serde_json::from_str(text)
        .map_err(|error| GatewayError::UnexpectedResponse(error.to_string()))?;

    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::UnexpectedResponse("order id missing".to_string()))?
        .to_string();

    Ok(RemoteOrder { id, raw })
}
