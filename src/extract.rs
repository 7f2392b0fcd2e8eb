// src/extract.rs
use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections render as `{ "error": ... }` like every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
