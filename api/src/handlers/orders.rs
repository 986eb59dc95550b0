//! Order handlers
//!
//! Endpoints for placing and viewing orders.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{OrderRequest, RequestedProduct};
use crate::domain::entities::{CustomerId, Order, OrderId, ProductId};
use crate::error::AppError;
use crate::AppState;

/// Request body for placing an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub products: Vec<OrderProductRequest>,
}

/// One product line in an order request
#[derive(Debug, Deserialize)]
pub struct OrderProductRequest {
    pub id: Uuid,
    pub quantity: i32,
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(request: CreateOrderRequest) -> Self {
        OrderRequest {
            customer_id: CustomerId(request.customer_id),
            products: request
                .products
                .into_iter()
                .map(|p| RequestedProduct {
                    id: ProductId(p.id),
                    quantity: p.quantity,
                })
                .collect(),
        }
    }
}

/// Response body for an order
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer: OrderCustomerResponse,
    pub order_products: Vec<OrderProductResponse>,
    /// Decimal string, e.g. "30.00"
    pub total: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct OrderCustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct OrderProductResponse {
    pub product_id: String,
    pub price: String,
    pub quantity: i32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total = order.total().to_string();
        OrderResponse {
            id: order.id.to_string(),
            customer: OrderCustomerResponse {
                id: order.customer.id.to_string(),
                name: order.customer.name,
                email: order.customer.email,
            },
            order_products: order
                .items
                .into_iter()
                .map(|i| OrderProductResponse {
                    product_id: i.product_id.to_string(),
                    price: i.price.to_string(),
                    quantity: i.quantity,
                })
                .collect(),
            total,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// POST /orders
///
/// Place an order for an existing customer.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let order = state.order_service.create_order(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state
        .order_service
        .find_by_id(&OrderId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(order.into()))
}
