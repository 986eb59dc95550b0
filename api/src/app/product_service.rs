//! Product service
//!
//! Adds products to the catalog.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::{NewProduct, Product};
use crate::domain::ports::ProductRepository;
use crate::error::{AppError, DomainError};

/// Largest price the `NUMERIC(10, 2)` price column holds: 99,999,999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2);

/// Service for managing the product catalog
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    products: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(products: Arc<PR>) -> Self {
        Self { products }
    }

    /// Create a product. Names are unique across the catalog.
    pub async fn create_product(
        &self,
        name: &str,
        price: Decimal,
        quantity: i32,
    ) -> Result<Product, AppError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 255 {
            return Err(DomainError::Validation(
                "Name must be between 1 and 255 characters".to_string(),
            )
            .into());
        }
        validate_price(price)?;
        if quantity < 0 {
            return Err(
                DomainError::Validation("Quantity must not be negative".to_string()).into(),
            );
        }

        if self.products.find_by_name(name).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!(
                "Product with name '{}' already exists",
                name
            ))
            .into());
        }

        let product = self
            .products
            .create(&NewProduct {
                name: name.to_string(),
                price,
                quantity,
            })
            .await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");

        Ok(product)
    }
}

/// Prices are stored exactly, so reject anything the column would round or
/// overflow. Trailing zeros do not count as decimal places.
fn validate_price(price: Decimal) -> Result<(), DomainError> {
    if price < Decimal::ZERO {
        return Err(DomainError::Validation("Price must not be negative".to_string()));
    }
    if price.normalize().scale() > 2 {
        return Err(DomainError::Validation(format!(
            "Price {} has more than 2 decimal places",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(DomainError::Validation(format!(
            "Price {} exceeds the maximum of {}",
            price, MAX_PRICE
        )));
    }

    Ok(())
}
