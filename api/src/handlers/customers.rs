//! Customer handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Customer;
use crate::error::AppError;
use crate::AppState;

/// Request body for registering a customer
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
}

/// Response body for a customer
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: customer.id.to_string(),
            name: customer.name,
            email: customer.email,
            created_at: customer.created_at.to_rfc3339(),
        }
    }
}

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let customer = state
        .customer_service
        .create_customer(&request.name, &request.email)
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}
