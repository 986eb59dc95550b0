//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{Customer, CustomerId, Product, ProductId};

/// Create a test customer with a unique email
pub fn test_customer() -> Customer {
    let suffix = &Uuid::new_v4().simple().to_string()[..8];
    Customer {
        id: CustomerId::new(),
        name: "Test Customer".to_string(),
        email: format!("customer-{}@example.com", suffix),
        created_at: Utc::now(),
    }
}

/// Create a test product with a given name, price and stock
pub fn test_product(name: &str, price: Decimal, quantity: i32) -> Product {
    Product {
        id: ProductId(Uuid::new_v4()),
        name: name.to_string(),
        price,
        quantity,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
