//! Order domain entity
//!
//! An order belongs to a customer and carries line items. Each line item
//! snapshots the product price at the time the order was placed, so later
//! price changes do not affect existing orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::Customer;
use super::product::ProductId;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    /// Line items in the order they were requested
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of price * quantity over all line items
    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

/// A product line within an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: ProductId,
    /// Unit price at the time of ordering
    pub price: Decimal,
    pub quantity: i32,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A priced line item ready to be persisted with a new order
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: i32,
}
