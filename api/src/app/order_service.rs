//! Order service
//!
//! Places orders: checks the customer, the requested products and their
//! stock, then persists the order with price snapshots while taking the
//! ordered quantities out of stock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::entities::{CustomerId, NewOrderItem, Order, OrderId, Product, ProductId};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::error::{AppError, DomainError};

/// A request to place an order
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<RequestedProduct>,
}

/// One product line of an order request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedProduct {
    pub id: ProductId,
    pub quantity: i32,
}

/// Service for placing and looking up orders
pub struct OrderService<CR, PR, OR>
where
    CR: CustomerRepository,
    PR: ProductRepository,
    OR: OrderRepository,
{
    customers: Arc<CR>,
    products: Arc<PR>,
    orders: Arc<OR>,
}

impl<CR, PR, OR> OrderService<CR, PR, OR>
where
    CR: CustomerRepository,
    PR: ProductRepository,
    OR: OrderRepository,
{
    pub fn new(customers: Arc<CR>, products: Arc<PR>, orders: Arc<OR>) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// Place an order
    ///
    /// Steps:
    /// 1. The customer must exist
    /// 2. Every requested product must exist
    /// 3. Every requested quantity must fit in current stock
    /// 4. The order is persisted with each product's current price, and
    ///    stock is decremented for every product, in one atomic write
    ///
    /// Nothing is written unless steps 1-3 pass. The store re-checks stock
    /// under lock in step 4, so an order that loses a race against a
    /// concurrent one fails with `InsufficientStock` and leaves no trace.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, AppError> {
        validate_request(request)?;

        let Some(customer) = self.customers.find_by_id(&request.customer_id).await? else {
            tracing::debug!(customer_id = %request.customer_id, "Order rejected: unknown customer");
            return Err(DomainError::CustomerNotFound(request.customer_id).into());
        };

        let ids: Vec<ProductId> = request.products.iter().map(|p| p.id).collect();
        let found = self.products.find_all_by_id(&ids).await?;
        let by_id: HashMap<ProductId, &Product> = found.iter().map(|p| (p.id, p)).collect();

        let missing: Vec<ProductId> = ids
            .iter()
            .filter(|id| !by_id.contains_key(id))
            .copied()
            .collect();
        if found.len() != ids.len() || !missing.is_empty() {
            tracing::debug!(customer_id = %customer.id, ?missing, "Order rejected: unknown products");
            return Err(DomainError::ProductNotFound(missing).into());
        }

        let mut items = Vec::with_capacity(request.products.len());
        for requested in &request.products {
            let product = by_id[&requested.id];

            if !product.has_stock_for(requested.quantity) {
                tracing::debug!(
                    product_id = %product.id,
                    requested = requested.quantity,
                    available = product.quantity,
                    "Order rejected: insufficient stock"
                );
                return Err(DomainError::InsufficientStock {
                    product_id: product.id,
                    requested: requested.quantity,
                    available: product.quantity,
                }
                .into());
            }

            items.push(NewOrderItem {
                product_id: product.id,
                price: product.price,
                quantity: requested.quantity,
            });
        }

        let order = match self.orders.create(&customer, &items).await {
            Ok(order) => order,
            Err(e @ DomainError::InsufficientStock { .. }) => {
                tracing::warn!(
                    customer_id = %customer.id,
                    error = %e,
                    "Order rejected: stock taken by a concurrent order"
                );
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            order_id = %order.id,
            customer_id = %customer.id,
            items = order.items.len(),
            total = %order.total(),
            "Order created"
        );

        Ok(order)
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, AppError> {
        Ok(self.orders.find_by_id(id).await?)
    }
}

/// Reject requests that are malformed regardless of store contents.
///
/// Duplicate product IDs are rejected rather than merged so that every line
/// item maps to exactly one requested line.
fn validate_request(request: &OrderRequest) -> Result<(), DomainError> {
    if request.products.is_empty() {
        return Err(DomainError::Validation(
            "Order must contain at least one product".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(request.products.len());
    for product in &request.products {
        if product.quantity < 1 {
            return Err(DomainError::Validation(format!(
                "Quantity for product {} must be at least 1",
                product.id
            )));
        }
        if !seen.insert(product.id) {
            return Err(DomainError::Validation(format!(
                "Product {} appears more than once",
                product.id
            )));
        }
    }

    Ok(())
}
