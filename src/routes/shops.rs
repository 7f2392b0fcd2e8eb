use axum::{routing::post, Router};
use crate::state::AppState;
use crate::handlers::shop::nearby_shops;

pub fn routes() -> Router<AppState> {
    Router::new().route("/shops/nearby", post(nearby_shops))
}
