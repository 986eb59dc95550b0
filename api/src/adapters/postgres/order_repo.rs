//! PostgreSQL adapter for OrderRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::product_repo::take_stock;
use crate::domain::entities::{
    Customer, NewOrderItem, Order, OrderId, OrderItem, ProductId, ProductQuantity,
};
use crate::domain::ports::OrderRepository;
use crate::entity::{customers, order_items, orders};
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(
        &self,
        customer: &Customer,
        items: &[NewOrderItem],
    ) -> Result<Order, DomainError> {
        let order_id = Uuid::new_v4();
        let now = Utc::now();

        let line_items: Vec<OrderItem> = items
            .iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                product_id: item.product_id,
                price: item.price,
                quantity: item.quantity,
            })
            .collect();

        let decrements: Vec<ProductQuantity> = items
            .iter()
            .map(|item| ProductQuantity::new(item.product_id, item.quantity))
            .collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        // Stock rows are locked first; any error below drops the transaction
        // and leaves both stock and orders untouched
        take_stock(&txn, &decrements).await?;

        orders::ActiveModel {
            id: Set(order_id),
            customer_id: Set(customer.id.0),
            created_at: Set(now.fixed_offset()),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        if !line_items.is_empty() {
            let models = line_items
                .iter()
                .enumerate()
                .map(|(position, item)| order_items::ActiveModel {
                    id: Set(item.id),
                    order_id: Set(order_id),
                    product_id: Set(item.product_id.0),
                    position: Set(position as i32),
                    price: Set(item.price),
                    quantity: Set(item.quantity),
                });

            order_items::Entity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Order {
            id: OrderId(order_id),
            customer: customer.clone(),
            items: line_items,
            created_at: now,
        })
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let result = orders::Entity::find_by_id(id.0)
            .find_also_related(customers::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some((order, customer)) = result else {
            return Ok(None);
        };

        // The foreign key guarantees the customer row exists
        let customer = customer.ok_or_else(|| {
            DomainError::Internal(format!("Order {} has no customer row", order.id))
        })?;

        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .order_by_asc(order_items::Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(Order {
            id: OrderId(order.id),
            customer: customer.into(),
            items: items.into_iter().map(|m| m.into()).collect(),
            created_at: order.created_at.with_timezone(&Utc),
        }))
    }
}

/// Convert SeaORM model to domain entity
impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        OrderItem {
            id: model.id,
            product_id: ProductId(model.product_id),
            price: model.price,
            quantity: model.quantity,
        }
    }
}
