use serde::{Deserialize, Serialize};

use crate::models::shop::Shop;

pub const SHOP_ADDED_MESSAGE: &str = "Shop Added";

#[derive(Deserialize)]
pub struct NearbyShopsRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize)]
pub struct AddShopResponse {
    pub message: &'static str,
    pub shop: Shop,
}
