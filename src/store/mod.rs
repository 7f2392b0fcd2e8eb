//! Shop persistence.
//!
//! Handlers only see [`ShopStore`]; the proximity search itself is delegated to the
//! backing store (PostGIS in production, a linear scan in memory otherwise).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::shop::{GeoPoint, NewShop, Shop};

pub use memory::InMemoryShopStore;
pub use postgres::PgShopStore;

#[async_trait]
pub trait ShopStore: Send + Sync {
    /// Persist the shop as-is and return the stored record.
    async fn insert(&self, shop: NewShop) -> Result<Shop, AppError>;

    /// Every shop within `max_distance_meters` of `point`, nearest first.
    async fn find_near(&self, point: GeoPoint, max_distance_meters: f64) -> Result<Vec<Shop>, AppError>;
}
