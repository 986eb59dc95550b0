//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::create_customer;
pub use orders::{create_order, get_order};
pub use products::create_product;
