//! PostgreSQL adapter for CustomerRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{Customer, CustomerId, NewCustomer};
use crate::domain::ports::CustomerRepository;
use crate::entity::customers;
use crate::error::DomainError;

/// PostgreSQL implementation of CustomerRepository
pub struct PostgresCustomerRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(customer.name.clone()),
            email: Set(customer.email.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "Customer with email '{}' already exists",
                customer.email
            )),
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Customer {
            id: CustomerId(model.id),
            name: model.name,
            email: model.email,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
