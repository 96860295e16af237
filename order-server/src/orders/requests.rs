//! Order-request rounds (submitted carts) and staff handling

use shared::error::{AppError, ErrorCode};
use shared::models::{CartItem, Order, OrderItem, OrderItemOption, OrderRequest};
use shared::order::{OrderRequestStatus, OrderStatus};
use shared::util;
use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;

/// Customer submits a cart within an order session
///
/// Item names and prices are snapshotted from the current menu so the
/// request stays stable when the menu changes later. The whole round
/// (request + items + options) is written in one transaction.
pub async fn place_request(
    pool: &PgPool,
    order_id: &str,
    cart: &[CartItem],
) -> ServiceResult<OrderRequest> {
    // 1. The order session must still accept rounds
    let order = load_open_session(pool, order_id).await?;
    if order.status != OrderStatus::Ordered {
        return Err(AppError::new(ErrorCode::OrderNotActive).into());
    }
    if cart.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty).into());
    }

    // 2. Snapshot the cart against the live menu
    let mut request = OrderRequest {
        id: db::new_id(),
        order_id: order.id.clone(),
        status: OrderRequestStatus::Placed,
        rejection_reason: None,
        rejection_displayed: false,
        created_at: util::now_millis(),
        items: Vec::new(),
    };

    for line in cart {
        if line.quantity <= 0 {
            return Err(AppError::validation("quantity must be positive").into());
        }
        let menu_item = db::menu::find_item(pool, &order.restaurant_id, &line.menu_item_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
        if menu_item.sold_out {
            return Err(AppError::with_message(
                ErrorCode::MenuItemSoldOut,
                format!("{} is sold out", menu_item.name),
            )
            .into());
        }

        let mut item = OrderItem {
            id: db::new_id(),
            order_request_id: request.id.clone(),
            menu_item_id: Some(menu_item.id.clone()),
            name: menu_item.name.clone(),
            unit_price: menu_item.price,
            quantity: line.quantity,
            options: Vec::new(),
        };

        if !line.option_ids.is_empty() {
            let options =
                db::menu::find_options_by_ids(pool, &menu_item.id, &line.option_ids).await?;
            if options.len() != line.option_ids.len() {
                return Err(AppError::new(ErrorCode::MenuItemOptionNotFound).into());
            }
            item.options = options
                .into_iter()
                .map(|o| OrderItemOption {
                    id: db::new_id(),
                    order_item_id: item.id.clone(),
                    name: o.name,
                    price: o.price,
                })
                .collect();
        }
        request.items.push(item);
    }

    // 3. Persist the round atomically
    let mut tx = pool.begin().await?;
    db::order_requests::insert(&mut *tx, &request).await?;
    for item in &request.items {
        db::order_requests::insert_item(&mut *tx, item).await?;
        for option in &item.options {
            db::order_requests::insert_item_option(&mut *tx, option).await?;
        }
    }
    tx.commit().await?;

    info!(
        request_id = %request.id,
        order_id = %order.id,
        items = request.items.len(),
        "Order request placed"
    );
    Ok(request)
}

/// Staff accepts a placed request: PLACED → ACCEPTED
pub async fn accept_request(
    pool: &PgPool,
    restaurant_id: &str,
    request_id: &str,
) -> ServiceResult<OrderRequest> {
    let request = find_owned_request(pool, restaurant_id, request_id).await?;
    if !request.status.is_open() {
        return Err(AppError::new(ErrorCode::OrderRequestNotPlaced).into());
    }

    db::order_requests::set_status(pool, &request.id, OrderRequestStatus::Accepted, None).await?;
    Ok(OrderRequest {
        status: OrderRequestStatus::Accepted,
        ..request
    })
}

/// Staff rejects a placed request: PLACED → CANCELLED with a reason
///
/// `rejection_displayed` starts false so the customer sees the banner
/// exactly once.
pub async fn reject_request(
    pool: &PgPool,
    restaurant_id: &str,
    request_id: &str,
    reason: &str,
) -> ServiceResult<OrderRequest> {
    let request = find_owned_request(pool, restaurant_id, request_id).await?;
    if !request.status.is_open() {
        return Err(AppError::new(ErrorCode::OrderRequestNotPlaced).into());
    }

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::validation("rejection reason must not be empty").into());
    }

    db::order_requests::set_status(pool, &request.id, OrderRequestStatus::Cancelled, Some(reason))
        .await?;
    info!(request_id = %request.id, "Order request rejected");
    Ok(OrderRequest {
        status: OrderRequestStatus::Cancelled,
        rejection_reason: Some(reason.to_string()),
        rejection_displayed: false,
        ..request
    })
}

/// Customer dismissed the rejection banner — one-way flag, independent
/// of request status; a second call is a no-op
pub async fn mark_rejection_displayed(
    pool: &PgPool,
    order_id: &str,
    request_id: &str,
) -> ServiceResult<OrderRequest> {
    let request = db::order_requests::find_by_id(pool, request_id)
        .await?
        .filter(|r| r.order_id == order_id)
        .ok_or_else(|| AppError::new(ErrorCode::OrderRequestNotFound))?;

    if request.rejection_displayed {
        return Ok(request);
    }

    db::order_requests::mark_rejection_displayed(pool, &request.id).await?;
    Ok(OrderRequest {
        rejection_displayed: true,
        ..request
    })
}

// ── Internals ──

/// Load an order for a customer-facing endpoint; terminal sessions are
/// Gone rather than NotFound so clients can distinguish "over" from
/// "never existed"
pub async fn load_open_session(pool: &PgPool, order_id: &str) -> ServiceResult<Order> {
    let order = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    if order.status.is_terminal() {
        return Err(AppError::gone("This order session has ended").into());
    }
    Ok(order)
}

async fn find_owned_request(
    pool: &PgPool,
    restaurant_id: &str,
    request_id: &str,
) -> ServiceResult<OrderRequest> {
    let owner = db::order_requests::find_restaurant_id(pool, request_id).await?;
    if owner.as_deref() != Some(restaurant_id) {
        return Err(AppError::new(ErrorCode::OrderRequestNotFound).into());
    }
    db::order_requests::find_by_id(pool, request_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderRequestNotFound).into())
}
