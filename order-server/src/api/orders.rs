//! Order API handlers (dashboard)
//!
//! History reads plus the staff-driven lifecycle actions.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderRequest};

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::orders::lifecycle;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/{id}", get(get_by_id))
        .route("/orders/{id}/confirm", post(confirm))
        .route("/orders/{id}/request-payment", post(request_payment))
        .route("/orders/{id}/complete", post(complete))
        .route("/orders/{id}/cancel", post(cancel))
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Serialize)]
struct OrderDetail {
    #[serde(flatten)]
    order: Order,
    requests: Vec<OrderRequest>,
}

/// GET /orders — order history, newest first (terminal orders included)
async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>, ServiceError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);
    let orders =
        db::orders::list_by_restaurant(&state.pool, &identity.restaurant_id, limit, offset)
            .await?;
    Ok(Json(orders))
}

/// GET /orders/{id} — order with all of its rounds
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<OrderDetail>, ServiceError> {
    let order = find_owned(&state, &identity, &id).await?;
    let requests = db::order_requests::list_by_order(&state.pool, &order.id).await?;
    Ok(Json(OrderDetail { order, requests }))
}

/// POST /orders/{id}/confirm — reserved customer arrived
async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Order>, ServiceError> {
    let order =
        lifecycle::confirm_reservation(&state.pool, &identity.restaurant_id, &id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/request-payment — staff requests the bill
async fn request_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Order>, ServiceError> {
    find_owned(&state, &identity, &id).await?;
    let order = lifecycle::request_payment(&state.pool, &id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/complete — payment received, table freed
async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Order>, ServiceError> {
    let order = lifecycle::complete(&state.pool, &identity.restaurant_id, &id).await?;
    Ok(Json(order))
}

/// POST /orders/{id}/cancel — staff cancels the visit
async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Order>, ServiceError> {
    find_owned(&state, &identity, &id).await?;
    let order = lifecycle::cancel(&state.pool, &id).await?;
    Ok(Json(order))
}

async fn find_owned(
    state: &AppState,
    identity: &RestaurantIdentity,
    order_id: &str,
) -> Result<Order, ServiceError> {
    db::orders::find_by_id(&state.pool, order_id)
        .await?
        .filter(|o| o.restaurant_id == identity.restaurant_id)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).into())
}
