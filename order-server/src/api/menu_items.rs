//! Menu item API handlers (dashboard)

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu-items", get(list).post(create))
        .route(
            "/menu-items/{id}",
            get(get_by_id).patch(update).delete(delete),
        )
}

/// GET /menu-items
async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Vec<MenuItem>>, ServiceError> {
    let items = db::menu::list_items(&state.pool, &identity.restaurant_id).await?;
    Ok(Json(items))
}

/// GET /menu-items/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<MenuItem>, ServiceError> {
    let item = db::menu::find_item(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
    Ok(Json(item))
}

/// POST /menu-items
async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<MenuItemCreate>,
) -> Result<Json<MenuItem>, ServiceError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Item name must not be empty").into());
    }
    if payload.price < 0 {
        return Err(AppError::validation("Price must not be negative").into());
    }
    if payload.options.iter().any(|o| o.price < 0) {
        return Err(AppError::validation("Option price must not be negative").into());
    }

    db::menu::find_category(&state.pool, &identity.restaurant_id, &payload.category_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let item = db::menu::create_item(&state.pool, &identity.restaurant_id, &payload).await?;

    invalidate_menu(&state, &identity).await;
    Ok(Json(item))
}

/// PATCH /menu-items/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<MenuItemUpdate>,
) -> Result<Json<MenuItem>, ServiceError> {
    if let Some(category_id) = &payload.category_id {
        db::menu::find_category(&state.pool, &identity.restaurant_id, category_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    }
    if payload.price.is_some_and(|p| p < 0) {
        return Err(AppError::validation("Price must not be negative").into());
    }

    let item = db::menu::update_item(&state.pool, &identity.restaurant_id, &id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    invalidate_menu(&state, &identity).await;
    Ok(Json(item))
}

/// DELETE /menu-items/{id}
///
/// Historic order items keep their snapshotted name/price, so deleting
/// a menu item never rewrites order history.
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<bool>, ServiceError> {
    let item = db::menu::find_item(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    db::menu::delete_item(&state.pool, &identity.restaurant_id, &id).await?;
    if let Some(key) = &item.image_key {
        let _ = state.images.delete(key).await;
    }

    invalidate_menu(&state, &identity).await;
    Ok(Json(true))
}

async fn invalidate_menu(state: &AppState, identity: &RestaurantIdentity) {
    state
        .cache
        .invalidate_prefix(&format!("{}:", identity.restaurant_id))
        .await;
}
