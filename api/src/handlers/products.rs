//! Product handlers

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Product;
use crate::error::AppError;
use crate::AppState;

/// Request body for adding a product
///
/// `price` accepts either a JSON number or a decimal string.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Response body for a product
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: i32,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.to_string(),
            name: product.name,
            price: product.price.to_string(),
            quantity: product.quantity,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state
        .product_service
        .create_product(&request.name, request.price, request.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}
