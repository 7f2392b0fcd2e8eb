pub mod admin;
pub mod payments;
pub mod realtime;
pub mod shops;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(shops::routes())
        .merge(payments::routes())
        .merge(admin::routes())
        .merge(realtime::routes())
}

/// Full application: API routes, health endpoints, CORS for any origin, request tracing.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router()
        .route("/", get(|| async { "Group Buy API" }))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
