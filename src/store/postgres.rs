use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::ShopStore;
use crate::error::AppError;
use crate::models::shop::{GeoPoint, NewShop, Offer, Shop};

/// Shops in PostgreSQL; `location` is a PostGIS geography with a GiST index.
#[derive(Clone)]
pub struct PgShopStore {
    db_pool: PgPool,
}

#[derive(FromRow)]
struct ShopRow {
    id: Uuid,
    name: Option<String>,
    razorpay_account_id: Option<String>,
    lng: f64,
    lat: f64,
    offers: Json<Vec<Offer>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShopRow> for Shop {
    type Error = AppError;

    fn try_from(row: ShopRow) -> Result<Self, Self::Error> {
        Ok(Shop {
            id: row.id,
            name: row.name,
            razorpay_account_id: row.razorpay_account_id,
            location: GeoPoint::new(row.lng, row.lat)
                .map_err(|e| AppError::internal(format!("Stored shop {} has a bad location: {e}", row.id)))?,
            offers: row.offers.0,
            created_at: row.created_at,
        })
    }
}

impl PgShopStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ShopStore for PgShopStore {
    async fn insert(&self, shop: NewShop) -> Result<Shop, AppError> {
        let row = sqlx::query_as::<_, ShopRow>(
            r#"INSERT INTO shops (name, razorpay_account_id, location, offers)
            VALUES ($1, $2, ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography, $5)
            RETURNING id, name, razorpay_account_id,
                ST_X(location::geometry) AS lng, ST_Y(location::geometry) AS lat,
                offers, created_at"#,
        )
        .bind(shop.name)
        .bind(shop.razorpay_account_id)
        .bind(shop.location.lng())
        .bind(shop.location.lat())
        .bind(Json(shop.offers))
        .fetch_one(&self.db_pool)
        .await?;

        row.try_into()
    }

    async fn find_near(&self, point: GeoPoint, max_distance_meters: f64) -> Result<Vec<Shop>, AppError> {
        let rows = sqlx::query_as::<_, ShopRow>(
            r#"SELECT id, name, razorpay_account_id,
                ST_X(location::geometry) AS lng, ST_Y(location::geometry) AS lat,
                offers, created_at
            FROM shops
            WHERE ST_DWithin(location, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3)
            ORDER BY location <-> ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography"#,
        )
        .bind(point.lng())
        .bind(point.lat())
        .bind(max_distance_meters)
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(Shop::try_from).collect()
    }
}
