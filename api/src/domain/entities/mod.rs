//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{Customer, CustomerId, NewCustomer};
pub use order::{NewOrderItem, Order, OrderId, OrderItem};
pub use product::{NewProduct, Product, ProductId, ProductQuantity};
