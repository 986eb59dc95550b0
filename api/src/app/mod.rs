//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod customer_service;
pub mod order_service;
pub mod product_service;

pub use customer_service::CustomerService;
pub use order_service::{OrderRequest, OrderService, RequestedProduct};
pub use product_service::ProductService;
