//! PostgreSQL adapter for ProductRepository

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{NewProduct, Product, ProductId, ProductQuantity};
use crate::domain::ports::ProductRepository;
use crate::entity::products;
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name.clone()),
            price: Set(product.price),
            quantity: Set(product.quantity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "Product with name '{}' already exists",
                product.name
            )),
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn update_quantity(
        &self,
        items: &[ProductQuantity],
    ) -> Result<Vec<Product>, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        // Returning early drops the transaction, which rolls it back
        let updated = take_stock(&txn, items).await?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(updated)
    }
}

/// Subtract each item's quantity from its product's stock on `conn`.
///
/// The affected rows are locked with `SELECT ... FOR UPDATE` and the whole
/// batch is checked before anything is written, so `conn` must be a
/// transaction the caller commits or drops.
pub(crate) async fn take_stock<C>(
    conn: &C,
    items: &[ProductQuantity],
) -> Result<Vec<Product>, DomainError>
where
    C: ConnectionTrait,
{
    // Ordered by id so concurrent batches take row locks in the same order
    let mut requested: BTreeMap<Uuid, i32> = BTreeMap::new();
    for item in items {
        let entry = requested.entry(item.product_id.0).or_insert(0);
        *entry = entry.saturating_add(item.quantity);
    }

    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let locked: HashMap<Uuid, products::Model> = products::Entity::find()
        .filter(products::Column::Id.is_in(requested.keys().copied()))
        .order_by_asc(products::Column::Id)
        .lock_exclusive()
        .all(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let missing: Vec<ProductId> = requested
        .keys()
        .filter(|id| !locked.contains_key(id))
        .map(|id| ProductId(*id))
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::ProductNotFound(missing));
    }

    for (id, quantity) in &requested {
        let current = &locked[id];
        if *quantity > current.quantity {
            return Err(DomainError::InsufficientStock {
                product_id: ProductId(*id),
                requested: *quantity,
                available: current.quantity,
            });
        }
    }

    let now = Utc::now().fixed_offset();
    let mut updated = Vec::with_capacity(requested.len());

    for (id, quantity) in &requested {
        let current = &locked[id];
        let model = products::ActiveModel {
            id: Set(*id),
            quantity: Set(current.quantity - quantity),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        updated.push(model.into());
    }

    Ok(updated)
}

/// Convert SeaORM model to domain entity
impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: ProductId(model.id),
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
