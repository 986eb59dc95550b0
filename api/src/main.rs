//! OrderDesk API Server
//!
//! Order placement for a small shop: customers, a product catalog with stock,
//! and orders that snapshot prices and decrement stock.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ConnectOptions, Database};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository};
use app::{CustomerService, OrderService, ProductService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService<PostgresCustomerRepository>>,
    pub product_service: Arc<ProductService<PostgresProductRepository>>,
    pub order_service: Arc<
        OrderService<PostgresCustomerRepository, PostgresProductRepository, PostgresOrderRepository>,
    >,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/customers", post(handlers::create_customer))
        .route("/products", post(handlers::create_product))
        .route("/orders", post(handlers::create_order))
        .route("/orders/:id", get(handlers::get_order))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orderdesk_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrderDesk API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .connect_timeout(config.database_connect_timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let customer_repo = Arc::new(PostgresCustomerRepository::new(db.clone()));
    let product_repo = Arc::new(PostgresProductRepository::new(db.clone()));
    let order_repo = Arc::new(PostgresOrderRepository::new(db.clone()));

    // Create application services
    let state = AppState {
        customer_service: Arc::new(CustomerService::new(customer_repo.clone())),
        product_service: Arc::new(ProductService::new(product_repo.clone())),
        order_service: Arc::new(OrderService::new(customer_repo, product_repo, order_repo)),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
