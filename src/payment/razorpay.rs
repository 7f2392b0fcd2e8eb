use async_trait::async_trait;
use serde::Deserialize;

use super::{OrderRequest, PaymentError, PaymentGateway};
use crate::config::RazorpayConfig;

/// Razorpay Orders API client (basic auth with key id / secret).
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    code: Option<String>,
    description: Option<String>,
}

impl RazorpayClient {
    pub fn new(config: &RazorpayConfig) -> Result<Self, PaymentError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, order: &OrderRequest) -> Result<serde_json::Value, PaymentError> {
        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(order)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = provider_message(&body).unwrap_or(body);
        tracing::warn!(status = status.as_u16(), %message, "Provider rejected order");

        Err(PaymentError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

fn provider_message(body: &str) -> Option<String> {
    let parsed: ProviderErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.description.or(parsed.error.code)
}
