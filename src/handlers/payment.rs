use axum::{extract::State, Json};
use serde_json::Value;

use crate::dtos::payment::CreateOrderRequest;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::payment::OrderRequest;
use crate::state::AppState;

pub async fn create_order(
    State(AppState { payments, .. }): State<AppState>,
    AppJson(req): AppJson<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    let order = OrderRequest::split(req.amount, &req.shop_account_id)?;
    tracing::info!(
        amount = order.amount,
        shop_share = order.shop_share(),
        platform_share = order.platform_share(),
        account = %req.shop_account_id,
        "Creating split order"
    );

    let created = payments.create_order(&order).await?;
    Ok(Json(created))
}
