use axum::{extract::State, Json};

use crate::dtos::shop::{AddShopResponse, NearbyShopsRequest, SHOP_ADDED_MESSAGE};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::shop::{GeoPoint, NewShop, Shop};
use crate::state::AppState;

/// Search radius for the nearby lookup.
pub const NEARBY_RADIUS_METERS: f64 = 5000.0;

pub async fn nearby_shops(
    State(AppState { shops, .. }): State<AppState>,
    AppJson(req): AppJson<NearbyShopsRequest>,
) -> Result<Json<Vec<Shop>>, AppError> {
    let point = GeoPoint::new(req.lng, req.lat)?;

    let found = shops.find_near(point, NEARBY_RADIUS_METERS).await?;
    tracing::debug!(%point, count = found.len(), "Nearby lookup");

    Ok(Json(found))
}

// Unauthenticated on purpose: used to seed shops.
pub async fn add_shop(
    State(AppState { shops, .. }): State<AppState>,
    AppJson(req): AppJson<NewShop>,
) -> Result<Json<AddShopResponse>, AppError> {
    let shop = shops.insert(req).await?;
    tracing::info!(shop_id = %shop.id, "Shop added");

    Ok(Json(AddShopResponse {
        message: SHOP_ADDED_MESSAGE,
        shop,
    }))
}
