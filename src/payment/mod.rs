//! Split-payment order creation against the payment provider.

pub mod razorpay;
pub mod split;

use async_trait::async_trait;

pub use razorpay::RazorpayClient;
pub use split::OrderRequest;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("amount {0} cannot be expressed in paise")]
    InvalidAmount(f64),

    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Creates orders at the payment provider and hands back the provider's order object untouched.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, order: &OrderRequest) -> Result<serde_json::Value, PaymentError>;
}
