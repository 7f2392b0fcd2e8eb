// src/main.rs
mod config;
mod database;
mod dtos;
mod error;
mod extract;
mod handlers;
mod models;
mod payment;
mod realtime;
mod routes;
mod state;
mod store;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::payment::{PaymentGateway, RazorpayClient};
use crate::store::{InMemoryShopStore, PgShopStore, ShopStore};

/// Ports tried after `PORT` when it is already taken.
const PORT_FALLBACK_ATTEMPTS: u16 = 20;

#[tokio::main]
async fn main() {
    // Load environment variables before the log filter reads RUST_LOG
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // Shop store: PostGIS when configured, memory otherwise
    let shops: Arc<dyn ShopStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            let db_pool = match database::create_pool(database_url) {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "Invalid DATABASE_URL");
                    return;
                }
            };
            // An unreachable database is logged, not fatal; queries fail with 500 until it is back.
            match database::migrate(&db_pool).await {
                Ok(()) => tracing::info!("Database connected"),
                Err(e) => tracing::error!(error = %e, "Database error"),
            }
            Arc::new(PgShopStore::new(db_pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, shops are kept in memory");
            Arc::new(InMemoryShopStore::new())
        }
    };

    let payments: Arc<dyn PaymentGateway> = match RazorpayClient::new(&config.razorpay) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build payment client");
            return;
        }
    };

    // Create application state
    let app_state = state::AppState::new(shops, payments);
    let app = routes::build_app(app_state);

    let Some((listener, addr)) = bind_listener(config.host, config.port).await else {
        tracing::error!(host = %config.host, port = config.port, "Failed to bind to any port");
        return;
    };
    tracing::info!("Server running on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

/// Binds the first free port in `port..=port + PORT_FALLBACK_ATTEMPTS`.
async fn bind_listener(host: IpAddr, port: u16) -> Option<(TcpListener, SocketAddr)> {
    for candidate in port..=port.saturating_add(PORT_FALLBACK_ATTEMPTS) {
        let addr = SocketAddr::from((host, candidate));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Some((listener, addr)),
            Err(e) => tracing::warn!(%addr, error = %e, "Port unavailable, trying next"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn taken_port_falls_through_to_a_later_one() {
        let host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let taken = TcpListener::bind((host, 0)).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let (_listener, addr) = bind_listener(host, port).await.unwrap();
        assert_ne!(addr.port(), port);
        assert!(addr.port() > port && addr.port() <= port.saturating_add(PORT_FALLBACK_ATTEMPTS));
    }

    #[tokio::test]
    async fn free_port_is_used_as_is() {
        let host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let port = TcpListener::bind((host, 0)).await.unwrap().local_addr().unwrap().port();

        let (_listener, addr) = bind_listener(host, port).await.unwrap();
        assert_eq!(addr.port(), port);
    }
}
