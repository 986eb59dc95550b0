//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::entities::{
    Customer, CustomerId, NewCustomer, NewOrderItem, NewProduct, Order, OrderId, OrderItem,
    Product, ProductId, ProductQuantity,
};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Customer Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a customer for testing
    pub fn with_customer(self, customer: Customer) -> Self {
        self.customers
            .write()
            .unwrap()
            .insert(customer.id, customer);
        self
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let customers = self.customers.read().unwrap();
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn create(&self, new_customer: &NewCustomer) -> Result<Customer, DomainError> {
        let mut customers = self.customers.write().unwrap();

        if customers.values().any(|c| c.email == new_customer.email) {
            return Err(DomainError::AlreadyExists(format!(
                "Customer with email '{}' already exists",
                new_customer.email
            )));
        }

        let customer = Customer {
            id: CustomerId::new(),
            name: new_customer.name.clone(),
            email: new_customer.email.clone(),
            created_at: Utc::now(),
        };
        customers.insert(customer.id, customer.clone());

        Ok(customer)
    }
}

// ============================================================================
// In-Memory Product Repository
// ============================================================================

/// Product store that counts successful writes.
///
/// `with_concurrent_sale` simulates another order taking stock between a
/// caller's read and its decrement.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    writes: AtomicUsize,
    concurrent_sale: RwLock<Option<ProductQuantity>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products.write().unwrap().insert(product.id, product);
        self
    }

    /// After the next `find_all_by_id` returns, take `sale.quantity` units
    /// of `sale.product_id` out of stock
    pub fn with_concurrent_sale(self, sale: ProductQuantity) -> Self {
        *self.concurrent_sale.write().unwrap() = Some(sale);
        self
    }

    pub fn stock_of(&self, id: &ProductId) -> Option<i32> {
        self.products.read().unwrap().get(id).map(|p| p.quantity)
    }

    pub fn set_price(&self, id: &ProductId, price: rust_decimal::Decimal) {
        if let Some(product) = self.products.write().unwrap().get_mut(id) {
            product.price = price;
        }
    }

    /// Number of successful product writes, including stock taken by orders
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, new_product: &NewProduct) -> Result<Product, DomainError> {
        let mut products = self.products.write().unwrap();

        if products.values().any(|p| p.name == new_product.name) {
            return Err(DomainError::AlreadyExists(format!(
                "Product with name '{}' already exists",
                new_product.name
            )));
        }

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: new_product.name.clone(),
            price: new_product.price,
            quantity: new_product.quantity,
            created_at: now,
            updated_at: now,
        };
        products.insert(product.id, product.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(product)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.values().find(|p| p.name == name).cloned())
    }

    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let found: Vec<Product> = {
            let products = self.products.read().unwrap();
            ids.iter().filter_map(|id| products.get(id).cloned()).collect()
        };

        if let Some(sale) = self.concurrent_sale.write().unwrap().take() {
            if let Some(product) = self.products.write().unwrap().get_mut(&sale.product_id) {
                product.quantity -= sale.quantity;
            }
        }

        Ok(found)
    }

    async fn update_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, DomainError> {
        // One write lock for the whole batch
        let mut products = self.products.write().unwrap();
        let updated = take_stock(&mut products, items)?;
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(updated)
    }
}

/// Check every item against current stock, then subtract. Nothing changes
/// if any item fails.
fn take_stock(
    products: &mut HashMap<ProductId, Product>,
    items: &[ProductQuantity],
) -> Result<Vec<Product>, DomainError> {
    let mut requested: BTreeMap<ProductId, i32> = BTreeMap::new();
    for item in items {
        *requested.entry(item.product_id).or_insert(0) += item.quantity;
    }

    for (id, quantity) in &requested {
        let product = products
            .get(id)
            .ok_or_else(|| DomainError::ProductNotFound(vec![*id]))?;
        if *quantity > product.quantity {
            return Err(DomainError::InsufficientStock {
                product_id: *id,
                requested: *quantity,
                available: product.quantity,
            });
        }
    }

    let now = Utc::now();
    let mut updated = Vec::with_capacity(requested.len());
    for (id, quantity) in &requested {
        if let Some(product) = products.get_mut(id) {
            product.quantity -= quantity;
            product.updated_at = now;
            updated.push(product.clone());
        }
    }

    Ok(updated)
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

/// Order store that takes stock from a shared `InMemoryProductRepository`
/// under the product lock, mirroring the single Postgres transaction.
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    products: Arc<InMemoryProductRepository>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl InMemoryOrderRepository {
    pub fn new(products: Arc<InMemoryProductRepository>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            products,
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    /// A repository whose order write fails after stock was taken, so the
    /// whole write must be discarded
    pub fn failing(products: Arc<InMemoryProductRepository>) -> Self {
        let repo = Self::new(products);
        *repo.should_fail.write().unwrap() = true;
        repo
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(
        &self,
        customer: &Customer,
        items: &[NewOrderItem],
    ) -> Result<Order, DomainError> {
        let decrements: Vec<ProductQuantity> = items
            .iter()
            .map(|item| ProductQuantity::new(item.product_id, item.quantity))
            .collect();

        let mut products = self.products.products.write().unwrap();

        // Work on a copy and only publish it once the order is stored
        let mut staged = products.clone();
        take_stock(&mut staged, &decrements)?;

        if *self.should_fail.read().unwrap() {
            return Err(DomainError::Database("Mock failure".to_string()));
        }

        let order = Order {
            id: OrderId::new(),
            customer: customer.clone(),
            items: items
                .iter()
                .map(|item| OrderItem {
                    id: Uuid::new_v4(),
                    product_id: item.product_id,
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            created_at: Utc::now(),
        };

        self.orders
            .write()
            .unwrap()
            .insert(order.id, order.clone());
        *products = staged;
        self.products.writes.fetch_add(1, Ordering::SeqCst);

        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(id).cloned())
    }
}
