use axum::{routing::post, Router};
use crate::state::AppState;
use crate::handlers::shop::add_shop;

pub fn routes() -> Router<AppState> {
    // No auth layer: shop seeding is open
    Router::new().route("/admin/add-shop", post(add_shop))
}
