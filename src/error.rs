// src/error.rs
use axum::{extract::rejection::JsonRejection, response::{IntoResponse, Response}, Json};
use http::StatusCode;
use serde_json::json;

use crate::models::shop::InvalidPoint;
use crate::payment::PaymentError;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    PaymentError(PaymentError),
    ValidationError(String),
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Every failure is reported as a 500; callers tell causes apart by the message only.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "{e}"),
            AppError::PaymentError(e) => write!(f, "{e}"),
            AppError::ValidationError(msg) | AppError::Internal(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The raw cause goes back to the caller; server-side failures are logged too.
        let error_message = self.to_string();
        match &self {
            AppError::PaymentError(PaymentError::Provider { status: provider_status, .. }) => {
                tracing::error!(provider_status, error = %error_message, "Payment provider call failed");
            }
            AppError::ValidationError(_) => tracing::warn!(error = %error_message, "Rejected request"),
            _ => tracing::error!(error = %error_message, "Request failed"),
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        AppError::PaymentError(err)
    }
}

impl From<InvalidPoint> for AppError {
    fn from(err: InvalidPoint) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}
