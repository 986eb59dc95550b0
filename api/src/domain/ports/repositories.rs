//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Customer, CustomerId, NewCustomer, NewOrderItem, NewProduct, Order, OrderId, Product,
    ProductId, ProductQuantity,
};
use crate::error::DomainError;

/// Repository for Customer entities
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// Find a customer by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    /// Create a new customer
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;
}

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Find a product by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError>;

    /// Find every product whose ID is in `ids`.
    ///
    /// IDs with no matching product are omitted; callers compare counts to
    /// detect them.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    /// Subtract each requested quantity from the product's current stock.
    ///
    /// The batch is applied atomically: current quantities are re-read under
    /// a lock, and if any product would go below zero nothing is written and
    /// `DomainError::InsufficientStock` is returned.
    async fn update_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, DomainError>;
}

/// Repository for Order entities
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and its line items, taking each item's quantity out
    /// of stock in the same atomic write.
    ///
    /// Stock is re-checked under lock, as in `ProductRepository::update_quantity`.
    /// If any product is missing or would go below zero, nothing is written and
    /// `ProductNotFound` or `InsufficientStock` is returned.
    async fn create(
        &self,
        customer: &Customer,
        items: &[NewOrderItem],
    ) -> Result<Order, DomainError>;

    /// Find an order by ID, with its customer and line items
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;
}
