//! Order-request API handlers (staff queue)

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderRequest;

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::orders::requests;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order-requests", get(list_open))
        .route("/order-requests/{id}", get(get_by_id))
        .route("/order-requests/{id}/accept", post(accept))
        .route("/order-requests/{id}/reject", post(reject))
}

#[derive(Deserialize)]
struct RejectRequest {
    reason: String,
}

/// GET /order-requests — PLACED requests waiting for staff
async fn list_open(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Vec<OrderRequest>>, ServiceError> {
    let open =
        db::order_requests::list_open_by_restaurant(&state.pool, &identity.restaurant_id).await?;
    Ok(Json(open))
}

/// GET /order-requests/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<OrderRequest>, ServiceError> {
    let owner = db::order_requests::find_restaurant_id(&state.pool, &id).await?;
    if owner.as_deref() != Some(identity.restaurant_id.as_str()) {
        return Err(AppError::new(ErrorCode::OrderRequestNotFound).into());
    }
    let request = db::order_requests::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderRequestNotFound))?;
    Ok(Json(request))
}

/// POST /order-requests/{id}/accept
async fn accept(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<OrderRequest>, ServiceError> {
    let request = requests::accept_request(&state.pool, &identity.restaurant_id, &id).await?;
    Ok(Json(request))
}

/// POST /order-requests/{id}/reject — rejection reason shown to the
/// customer exactly once via the rejection-displayed flag
async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<OrderRequest>, ServiceError> {
    let request =
        requests::reject_request(&state.pool, &identity.restaurant_id, &id, &payload.reason)
            .await?;
    Ok(Json(request))
}
