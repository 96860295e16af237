//! Order request database operations
//!
//! Requests hold name/price snapshots of their items; the snapshots are
//! immutable once written and disappear only with their parent request
//! (ON DELETE CASCADE).

use shared::models::{OrderItem, OrderItemOption, OrderRequest};
use shared::order::OrderRequestStatus;
use sqlx::{PgExecutor, PgPool};

const REQUEST_COLUMNS: &str =
    "id, order_id, status, rejection_reason, rejection_displayed, created_at";

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<OrderRequest>, sqlx::Error> {
    let request: Option<OrderRequest> = sqlx::query_as(&format!(
        "SELECT {REQUEST_COLUMNS} FROM order_requests WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match request {
        Some(mut request) => {
            request.items = load_items(pool, std::slice::from_ref(&request.id)).await?;
            Ok(Some(request))
        }
        None => Ok(None),
    }
}

/// Restaurant owning a request (via its order); used for ownership checks
pub async fn find_restaurant_id(pool: &PgPool, id: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT o.restaurant_id FROM order_requests r
         JOIN orders o ON o.id = r.order_id
         WHERE r.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| r.0))
}

pub async fn list_by_order(
    pool: &PgPool,
    order_id: &str,
) -> Result<Vec<OrderRequest>, sqlx::Error> {
    let mut requests: Vec<OrderRequest> = sqlx::query_as(&format!(
        "SELECT {REQUEST_COLUMNS} FROM order_requests
         WHERE order_id = $1 ORDER BY created_at"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    let ids: Vec<String> = requests.iter().map(|r| r.id.clone()).collect();
    let items = load_items(pool, &ids).await?;
    for request in &mut requests {
        request.items = items
            .iter()
            .filter(|i| i.order_request_id == request.id)
            .cloned()
            .collect();
    }
    Ok(requests)
}

/// Open requests across a restaurant (the staff queue)
pub async fn list_open_by_restaurant(
    pool: &PgPool,
    restaurant_id: &str,
) -> Result<Vec<OrderRequest>, sqlx::Error> {
    let mut requests: Vec<OrderRequest> = sqlx::query_as(
        "SELECT r.id, r.order_id, r.status, r.rejection_reason, r.rejection_displayed, r.created_at
         FROM order_requests r
         JOIN orders o ON o.id = r.order_id
         WHERE o.restaurant_id = $1 AND r.status = 'PLACED'
         ORDER BY r.created_at",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    let ids: Vec<String> = requests.iter().map(|r| r.id.clone()).collect();
    let items = load_items(pool, &ids).await?;
    for request in &mut requests {
        request.items = items
            .iter()
            .filter(|i| i.order_request_id == request.id)
            .cloned()
            .collect();
    }
    Ok(requests)
}

pub async fn insert<'e>(
    ex: impl PgExecutor<'e>,
    request: &OrderRequest,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_requests (id, order_id, status, rejection_reason, rejection_displayed, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&request.id)
    .bind(&request.order_id)
    .bind(request.status)
    .bind(&request.rejection_reason)
    .bind(request.rejection_displayed)
    .bind(request.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn insert_item<'e>(ex: impl PgExecutor<'e>, item: &OrderItem) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_items (id, order_request_id, menu_item_id, name, unit_price, quantity)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&item.id)
    .bind(&item.order_request_id)
    .bind(&item.menu_item_id)
    .bind(&item.name)
    .bind(item.unit_price)
    .bind(item.quantity)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn insert_item_option<'e>(
    ex: impl PgExecutor<'e>,
    option: &OrderItemOption,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_item_options (id, order_item_id, name, price)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(&option.id)
    .bind(&option.order_item_id)
    .bind(&option.name)
    .bind(option.price)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn set_status<'e>(
    ex: impl PgExecutor<'e>,
    id: &str,
    status: OrderRequestStatus,
    rejection_reason: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE order_requests SET status = $1, rejection_reason = $2 WHERE id = $3",
    )
    .bind(status)
    .bind(rejection_reason)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(())
}

/// Close every still-open request of an order (used when the order
/// itself reaches a terminal state)
pub async fn close_open_for_order<'e>(
    ex: impl PgExecutor<'e>,
    order_id: &str,
    status: OrderRequestStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE order_requests SET status = $1
         WHERE order_id = $2 AND status IN ('PLACED', 'ACCEPTED')",
    )
    .bind(status)
    .bind(order_id)
    .execute(ex)
    .await?;
    Ok(())
}

/// One-way flag: mark the rejection banner as shown to the customer
pub async fn mark_rejection_displayed(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE order_requests SET rejection_displayed = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Load snapshotted items (with their options) for a set of requests
async fn load_items(pool: &PgPool, request_ids: &[String]) -> Result<Vec<OrderItem>, sqlx::Error> {
    if request_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut items: Vec<OrderItem> = sqlx::query_as(
        "SELECT id, order_request_id, menu_item_id, name, unit_price, quantity
         FROM order_items
         WHERE order_request_id = ANY($1)
         ORDER BY name",
    )
    .bind(request_ids)
    .fetch_all(pool)
    .await?;

    let item_ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
    if item_ids.is_empty() {
        return Ok(items);
    }

    let options: Vec<OrderItemOption> = sqlx::query_as(
        "SELECT id, order_item_id, name, price
         FROM order_item_options
         WHERE order_item_id = ANY($1)
         ORDER BY name",
    )
    .bind(&item_ids)
    .fetch_all(pool)
    .await?;

    for item in &mut items {
        item.options = options
            .iter()
            .filter(|o| o.order_item_id == item.id)
            .cloned()
            .collect();
    }
    Ok(items)
}
