//! Menu category API handlers (dashboard)

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route(
            "/categories/{id}",
            axum::routing::patch(update).delete(delete),
        )
}

/// GET /categories
async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Vec<MenuCategory>>, ServiceError> {
    let categories = db::menu::list_categories(&state.pool, &identity.restaurant_id).await?;
    Ok(Json(categories))
}

/// POST /categories
async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<MenuCategoryCreate>,
) -> Result<Json<MenuCategory>, ServiceError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Category name must not be empty").into());
    }

    let existing = db::menu::list_categories(&state.pool, &identity.restaurant_id).await?;
    if existing.iter().any(|c| c.name == name) {
        return Err(AppError::new(ErrorCode::CategoryNameExists).into());
    }

    let category = db::menu::create_category(
        &state.pool,
        &identity.restaurant_id,
        &MenuCategoryCreate {
            name: name.to_string(),
            sort_order: payload.sort_order,
        },
    )
    .await?;

    invalidate_menu(&state, &identity).await;
    Ok(Json(category))
}

/// PATCH /categories/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<MenuCategoryUpdate>,
) -> Result<Json<MenuCategory>, ServiceError> {
    let category = db::menu::update_category(&state.pool, &identity.restaurant_id, &id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    invalidate_menu(&state, &identity).await;
    Ok(Json(category))
}

/// DELETE /categories/{id} — refused while the category still has items
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<bool>, ServiceError> {
    let category = db::menu::find_category(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    if db::menu::count_items_in_category(&state.pool, &category.id).await? > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasItems).into());
    }

    db::menu::delete_category(&state.pool, &identity.restaurant_id, &id).await?;
    if let Some(key) = &category.image_key {
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
