//! Menu/category image upload handlers (dashboard)
//!
//! Raw image bytes in the request body; the Content-Type header decides
//! the stored type. Keys are namespaced per restaurant and entity.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::put;
use axum::{Extension, Json, Router};
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories/{id}/image",
            put(upload_category_image).delete(delete_category_image),
        )
        .route(
            "/menu-items/{id}/image",
            put(upload_item_image).delete(delete_item_image),
        )
}

fn image_content_type(headers: &http::HeaderMap) -> Result<String, AppError> {
    let content_type = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(AppError::validation("Body must be an image"));
    }
    Ok(content_type.to_string())
}

fn check_size(bytes: &Bytes) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::validation("Image body is empty"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::validation("Image exceeds the 5 MiB limit"));
    }
    Ok(())
}

/// PUT /categories/{id}/image
async fn upload_category_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    headers: http::HeaderMap,
    bytes: Bytes,
) -> Result<Json<Value>, ServiceError> {
    let content_type = image_content_type(&headers)?;
    check_size(&bytes)?;

    db::menu::find_category(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let key = state
        .images
        .upload(
            &identity.restaurant_id,
            "categories",
            &id,
            bytes.to_vec(),
            &content_type,
        )
        .await?;
    db::menu::set_category_image(&state.pool, &identity.restaurant_id, &id, Some(&key)).await?;

    invalidate_menu(&state, &identity).await;
    Ok(Json(json!({ "image_key": key })))
}

/// DELETE /categories/{id}/image
async fn delete_category_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<bool>, ServiceError> {
    let category = db::menu::find_category(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    if let Some(key) = &category.image_key {
        state.images.delete(key).await?;
        db::menu::set_category_image(&state.pool, &identity.restaurant_id, &id, None).await?;
    }

    invalidate_menu(&state, &identity).await;
    Ok(Json(true))
}

/// PUT /menu-items/{id}/image
async fn upload_item_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
    headers: http::HeaderMap,
    bytes: Bytes,
) -> Result<Json<Value>, ServiceError> {
    let content_type = image_content_type(&headers)?;
    check_size(&bytes)?;

    db::menu::find_item(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    let key = state
        .images
        .upload(
            &identity.restaurant_id,
            "menu_items",
            &id,
            bytes.to_vec(),
            &content_type,
        )
        .await?;
    db::menu::set_item_image(&state.pool, &identity.restaurant_id, &id, Some(&key)).await?;

    invalidate_menu(&state, &identity).await;
    Ok(Json(json!({ "image_key": key })))
}

/// DELETE /menu-items/{id}/image
async fn delete_item_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<bool>, ServiceError> {
    let item = db::menu::find_item(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    if let Some(key) = &item.image_key {
        state.images.delete(key).await?;
        db::menu::set_item_image(&state.pool, &identity.restaurant_id, &id, None).await?;
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
