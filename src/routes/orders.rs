//! Order routes.
//!
//! POST /orders      - Submit an order (header and snapshot details)
//! GET  /orders      - All orders with details, newest first
//! GET  /orders/{id} - One order with details
//! PUT  /orders      - Move an order to another status

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateOrderRequest, Order, OrderHeader, OrderStatus, UnknownVariant, UpdateOrderStatusRequest,
};

pub fn router() -> Router {
    Router::new()
        .route(
            "/orders",
            get(list_orders).post(create_order).put(update_status),
        )
        .route("/orders/{id}", get(get_order))
}

/// Submit an order. Validation failures and unknown option ids come back
/// as 400 with nothing persisted.
async fn create_order(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderHeader>)> {
    let header = store.submit_order(req).await?;
    info!("Order {} submitted by {}", header.id, header.customer_name);
    Ok((StatusCode::CREATED, Json(header)))
}

async fn list_orders(Extension(store): Extension<SharedStore>) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(store.list_orders().await?))
}

async fn get_order(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    store
        .get_order(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("order"))
}

/// Any of the six statuses is accepted from any current status.
async fn update_status(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<OrderHeader>> {
    let status: OrderStatus = req
        .status
        .parse()
        .map_err(|e: UnknownVariant| AppError::Validation(e.to_string()))?;
    store
        .update_order_status(req.id, status)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("order"))
}
