use axum::{routing::post, Router};
use crate::state::AppState;
use crate::handlers::payment::create_order;

pub fn routes() -> Router<AppState> {
    Router::new().route("/payment/create-order", post(create_order))
}
