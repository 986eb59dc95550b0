//! Customer service
//!
//! Handles customer registration.

use std::sync::Arc;

use crate::domain::entities::{Customer, NewCustomer};
use crate::domain::ports::CustomerRepository;
use crate::error::{AppError, DomainError};

/// Service for managing customers
pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    customers: Arc<CR>,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    pub fn new(customers: Arc<CR>) -> Self {
        Self { customers }
    }

    /// Register a new customer
    ///
    /// Emails are compared case-insensitively and stored lowercased.
    pub async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, AppError> {
        let name = name.trim();
        if name.is_empty() || name.len() > 100 {
            return Err(DomainError::Validation(
                "Name must be between 1 and 100 characters".to_string(),
            )
            .into());
        }

        let email = email.trim().to_lowercase();
        if !is_plausible_email(&email) {
            return Err(DomainError::Validation(format!("Invalid email: {}", email)).into());
        }

        if self.customers.find_by_email(&email).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!(
                "Customer with email '{}' already exists",
                email
            ))
            .into());
        }

        let customer = self
            .customers
            .create(&NewCustomer {
                name: name.to_string(),
                email,
            })
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer created");

        Ok(customer)
    }
}

/// Shape check only: one '@' with something on both sides
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}
