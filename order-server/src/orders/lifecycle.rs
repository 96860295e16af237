//! Order / table status transitions

use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, Restaurant, RestaurantTable};
use shared::order::{OrderStatus, TableStatus};
use shared::{qr, util};
use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::error::{ServiceError, ServiceResult};

/// Outcome of a QR scan: the order session plus whether this scan
/// created it (a re-scan of an occupied table resumes the session)
#[derive(Debug)]
pub struct ScanOutcome {
    pub order: Order,
    pub created: bool,
}

/// QR-code scan entry point
///
/// Decodes the token, enforces the business-hours/holiday window, and
/// either resumes the table's active order or activates the table:
/// Order(ORDERED) inserted and table set OCCUPIED in one transaction.
pub async fn activate_by_scan(pool: &PgPool, token: &str) -> ServiceResult<ScanOutcome> {
    // 1. Resolve the table from the token
    let table_id = qr::decode_table_token(token)
        .map_err(|e| AppError::with_message(ErrorCode::ValidationFailed, e.to_string()))?;
    let table = db::tables::find_by_id(pool, &table_id)
        .await?
        .filter(|t| t.qr_token == token)
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    // 2. Business-hours / holiday window
    let restaurant = db::restaurants::find_by_id(pool, &table.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    check_open_now(&restaurant)?;

    // 3. A re-scan of an occupied table resumes the existing session.
    //    Check-then-act: no row lock is held between this guard and the
    //    insert below, so two concurrent first scans can race.
    if let Some(existing) = db::orders::find_active_by_table(pool, &table.id).await? {
        if table.status == TableStatus::Occupied {
            return Ok(ScanOutcome {
                order: existing,
                created: false,
            });
        }
        // Reserved table: the named customer is confirmed by staff, not
        // by scanning
        return Err(AppError::new(ErrorCode::TableReserved).into());
    }

    match table.status {
        TableStatus::Available => {}
        TableStatus::Unavailable => {
            return Err(AppError::new(ErrorCode::TableUnavailable).into());
        }
        TableStatus::Reserved | TableStatus::Occupied => {
            // Status says taken but no active order exists — a previous
            // transition was interrupted; treat as occupied
            return Err(AppError::new(ErrorCode::TableOccupied).into());
        }
    }

    // 4. Activate: order insert + table update, atomically
    let order = insert_order_with_table_status(
        pool,
        &table,
        OrderStatus::Ordered,
        TableStatus::Occupied,
        None,
    )
    .await?;

    info!(order_id = %order.id, table_id = %table.id, "Table activated by QR scan");
    Ok(ScanOutcome {
        order,
        created: true,
    })
}

/// Owner reserves a table for a named customer
///
/// Creates Order(PENDING) and sets the table RESERVED. Rejected with a
/// 403 when the table already has an active order; no state changes.
pub async fn reserve(
    pool: &PgPool,
    restaurant_id: &str,
    table_id: &str,
    customer_name: &str,
) -> ServiceResult<Order> {
    if customer_name.trim().is_empty() {
        return Err(AppError::validation("customer_name must not be empty").into());
    }

    let table = find_owned_table(pool, restaurant_id, table_id).await?;

    if db::orders::find_active_by_table(pool, &table.id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::TableOccupied).into());
    }
    match table.status {
        TableStatus::Available => {}
        TableStatus::Unavailable => {
            return Err(AppError::new(ErrorCode::TableUnavailable).into());
        }
        TableStatus::Reserved => return Err(AppError::new(ErrorCode::TableReserved).into()),
        TableStatus::Occupied => return Err(AppError::new(ErrorCode::TableOccupied).into()),
    }

    let order = insert_order_with_table_status(
        pool,
        &table,
        OrderStatus::Pending,
        TableStatus::Reserved,
        Some(customer_name.trim().to_string()),
    )
    .await?;

    info!(order_id = %order.id, table_id = %table.id, "Table reserved");
    Ok(order)
}

/// Reserved customer confirmed on arrival: PENDING → ORDERED,
/// RESERVED → OCCUPIED
pub async fn confirm_reservation(
    pool: &PgPool,
    restaurant_id: &str,
    order_id: &str,
) -> ServiceResult<Order> {
    let order = find_owned_order(pool, restaurant_id, order_id).await?;
    transition(pool, order, OrderStatus::Ordered).await
}

/// Customer or staff requests the bill: ORDERED → PAYMENT_REQUESTED
///
/// The table stays OCCUPIED.
pub async fn request_payment(pool: &PgPool, order_id: &str) -> ServiceResult<Order> {
    let order = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    transition(pool, order, OrderStatus::PaymentRequested).await
}

/// Staff records payment received: PAYMENT_REQUESTED → COMPLETED,
/// table freed back to AVAILABLE; accepted requests close as COMPLETED
pub async fn complete(pool: &PgPool, restaurant_id: &str, order_id: &str) -> ServiceResult<Order> {
    let order = find_owned_order(pool, restaurant_id, order_id).await?;
    transition(pool, order, OrderStatus::Completed).await
}

/// Staff or customer cancels: PENDING/ORDERED → CANCELLED, table freed
/// back to AVAILABLE; the order stays queryable as history
pub async fn cancel(pool: &PgPool, order_id: &str) -> ServiceResult<Order> {
    let order = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    transition(pool, order, OrderStatus::Cancelled).await
}

/// Manual AVAILABLE ⇄ UNAVAILABLE toggle
///
/// Only permitted while the table has no active order.
pub async fn set_table_availability(
    pool: &PgPool,
    restaurant_id: &str,
    table_id: &str,
    available: bool,
) -> ServiceResult<RestaurantTable> {
    let table = find_owned_table(pool, restaurant_id, table_id).await?;

    if !table.status.can_toggle_availability()
        || db::orders::find_active_by_table(pool, &table.id)
            .await?
            .is_some()
    {
        return Err(AppError::new(ErrorCode::TableOccupied).into());
    }

    let status = if available {
        TableStatus::Available
    } else {
        TableStatus::Unavailable
    };
    db::tables::set_status(pool, &table.id, status).await?;

    Ok(RestaurantTable { status, ..table })
}

// ── Internals ──

/// Shared tail of scan/reserve: create the order and move the table,
/// in one transaction
async fn insert_order_with_table_status(
    pool: &PgPool,
    table: &RestaurantTable,
    order_status: OrderStatus,
    table_status: TableStatus,
    customer_name: Option<String>,
) -> ServiceResult<Order> {
    let now = util::now_millis();
    let order = Order {
        id: db::new_id(),
        restaurant_id: table.restaurant_id.clone(),
        table_id: table.id.clone(),
        status: order_status,
        customer_name,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;
    db::orders::insert(&mut *tx, &order).await?;
    db::tables::set_status(&mut *tx, &table.id, table_status).await?;
    tx.commit().await?;

    Ok(order)
}

/// Guarded status transition, updating the owning table when the target
/// status implies one (terminal states always free it)
async fn transition(pool: &PgPool, order: Order, next: OrderStatus) -> ServiceResult<Order> {
    if !order.status.can_transition_to(next) {
        return Err(transition_error(order.status).into());
    }

    let now = util::now_millis();
    let mut tx = pool.begin().await?;
    db::orders::set_status(&mut *tx, &order.id, next, now).await?;
    if let Some(status) = next.implied_table_status() {
        db::tables::set_status(&mut *tx, &order.table_id, status).await?;
    }
    if next.is_terminal() {
        let closed = match next {
            OrderStatus::Completed => shared::order::OrderRequestStatus::Completed,
            _ => shared::order::OrderRequestStatus::Cancelled,
        };
        db::order_requests::close_open_for_order(&mut *tx, &order.id, closed).await?;
    }
    tx.commit().await?;

    info!(order_id = %order.id, from = ?order.status, to = ?next, "Order status transition");
    Ok(Order {
        status: next,
        updated_at: now,
        ..order
    })
}

fn transition_error(current: OrderStatus) -> AppError {
    match current {
        OrderStatus::Completed => AppError::new(ErrorCode::OrderAlreadyCompleted),
        OrderStatus::Cancelled => AppError::new(ErrorCode::OrderAlreadyCancelled),
        _ => AppError::new(ErrorCode::InvalidStatusTransition),
    }
}

fn check_open_now(restaurant: &Restaurant) -> Result<(), ServiceError> {
    let now = Utc::now().naive_utc();
    if restaurant
        .holidays
        .iter()
        .any(|h| h == &now.date().format("%Y-%m-%d").to_string())
    {
        return Err(AppError::new(ErrorCode::HolidayClosed).into());
    }
    if !restaurant.is_open_at(now.date(), now.time()) {
        return Err(AppError::new(ErrorCode::OutsideBusinessHours).into());
    }
    Ok(())
}

async fn find_owned_table(
    pool: &PgPool,
    restaurant_id: &str,
    table_id: &str,
) -> ServiceResult<RestaurantTable> {
    db::tables::find_by_id(pool, table_id)
        .await?
        .filter(|t| t.restaurant_id == restaurant_id)
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).into())
}

async fn find_owned_order(
    pool: &PgPool,
    restaurant_id: &str,
    order_id: &str,
) -> ServiceResult<Order> {
    db::orders::find_by_id(pool, order_id)
        .await?
        .filter(|o| o.restaurant_id == restaurant_id)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).into())
}
