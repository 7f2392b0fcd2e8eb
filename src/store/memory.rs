use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::ShopStore;
use crate::error::AppError;
use crate::models::shop::{GeoPoint, NewShop, Shop};

/// In-memory shop store for local development and tests.
#[derive(Clone, Default)]
pub struct InMemoryShopStore {
    shops: Arc<RwLock<Vec<Shop>>>,
}

impl InMemoryShopStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShopStore for InMemoryShopStore {
    async fn insert(&self, shop: NewShop) -> Result<Shop, AppError> {
        let shop = shop.into_shop(Uuid::new_v4(), Utc::now());
        self.shops.write().push(shop.clone());
        Ok(shop)
    }

    async fn find_near(&self, point: GeoPoint, max_distance_meters: f64) -> Result<Vec<Shop>, AppError> {
        let shops = self.shops.read();
        let mut nearby: Vec<(f64, Shop)> = shops
            .iter()
            .map(|shop| (point.distance_meters(&shop.location), shop))
            .filter(|(distance, _)| *distance <= max_distance_meters)
            .map(|(distance, shop)| (distance, shop.clone()))
            .collect();

        nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(nearby.into_iter().map(|(_, shop)| shop).collect())
    }
}
