//! Table management API handlers (dashboard)

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, RestaurantTable, TableCreate, TableUpdate};

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::orders::lifecycle;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tables", get(list).post(create))
        .route("/tables/{id}", axum::routing::patch(update).delete(delete))
        .route("/tables/{id}/availability", post(set_availability))
        .route("/tables/{id}/reserve", post(reserve))
}

#[derive(Deserialize)]
struct AvailabilityRequest {
    available: bool,
}

#[derive(Deserialize)]
struct ReserveRequest {
    customer_name: String,
}

/// GET /tables
async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Vec<RestaurantTable>>, ServiceError> {
    let tables = db::tables::list(&state.pool, &identity.restaurant_id).await?;
    Ok(Json(tables))
}

/// POST /tables — bounded by the subscription plan's table quota
async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<TableCreate>,
) -> Result<Json<RestaurantTable>, ServiceError> {
    if payload.number <= 0 {
        return Err(AppError::validation("Table number must be positive").into());
    }

    let subscription = db::subscriptions::get_active(&state.pool, &identity.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SubscriptionRequired).with_redirect("/plans"))?;
    let plan = db::plans::find_by_id(&state.pool, &subscription.plan_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    let current = db::tables::count(&state.pool, &identity.restaurant_id).await?;
    if current >= plan.max_tables as i64 {
        return Err(AppError::forbidden(format!(
            "Plan allows at most {} tables",
            plan.max_tables
        ))
        .into());
    }

    let existing = db::tables::list(&state.pool, &identity.restaurant_id).await?;
    if existing.iter().any(|t| t.number == payload.number) {
        return Err(AppError::new(ErrorCode::TableNumberExists).into());
    }

    let table = db::tables::create(&state.pool, &identity.restaurant_id, &payload).await?;
    Ok(Json(table))
}

/// PATCH /tables/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<TableUpdate>,
) -> Result<Json<RestaurantTable>, ServiceError> {
    let table = db::tables::update(&state.pool, &identity.restaurant_id, &id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    Ok(Json(table))
}

/// DELETE /tables/{id} — refused while an active order exists
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<bool>, ServiceError> {
    if db::orders::find_active_by_table(&state.pool, &id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::TableOccupied).into());
    }

    let deleted = db::tables::delete(&state.pool, &identity.restaurant_id, &id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::TableNotFound).into());
    }
    Ok(Json(true))
}

/// POST /tables/{id}/availability — manual AVAILABLE ⇄ UNAVAILABLE
async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<AvailabilityRequest>,
) -> Result<Json<RestaurantTable>, ServiceError> {
    let table = lifecycle::set_table_availability(
        &state.pool,
        &identity.restaurant_id,
        &id,
        payload.available,
    )
    .await?;
    Ok(Json(table))
}

/// POST /tables/{id}/reserve — reserve for a named customer
async fn reserve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<ReserveRequest>,
) -> Result<Json<Order>, ServiceError> {
    let order = lifecycle::reserve(
        &state.pool,
        &identity.restaurant_id,
        &id,
        &payload.customer_name,
    )
    .await?;
    Ok(Json(order))
}
