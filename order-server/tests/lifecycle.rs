//! Order/table lifecycle integration tests
//!
//! Each test runs against a fresh migrated database.

use order_server::db;
use order_server::error::ServiceError;
use order_server::orders::{lifecycle, requests};
use shared::error::{AppError, ErrorCode};
use shared::models::{CartItem, MenuCategoryCreate, MenuItemCreate, RestaurantTable, TableCreate};
use shared::order::{OrderRequestStatus, OrderStatus, TableStatus, TableType};
use shared::util;
use sqlx::PgPool;

async fn seed_restaurant(pool: &PgPool) -> String {
    let id = db::new_id();
    db::restaurants::create(
        pool,
        &id,
        &format!("{id}@example.com"),
        "argon2-hash-placeholder",
        "Test Restaurant",
        util::now_millis(),
    )
    .await
    .unwrap();
    id
}

async fn seed_table(pool: &PgPool, restaurant_id: &str, number: i32) -> RestaurantTable {
    db::tables::create(
        pool,
        restaurant_id,
        &TableCreate {
            table_type: TableType::Table,
            number,
        },
    )
    .await
    .unwrap()
}

async fn seed_menu_item(pool: &PgPool, restaurant_id: &str, name: &str, price: i64) -> String {
    let category = db::menu::create_category(
        pool,
        restaurant_id,
        &MenuCategoryCreate {
            name: format!("Category for {name}"),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    db::menu::create_item(
        pool,
        restaurant_id,
        &MenuItemCreate {
            category_id: category.id,
            name: name.to_string(),
            description: None,
            price,
            sort_order: None,
            options: vec![],
        },
    )
    .await
    .unwrap()
    .id
}

async fn table_status(pool: &PgPool, table_id: &str) -> TableStatus {
    db::tables::find_by_id(pool, table_id)
        .await
        .unwrap()
        .unwrap()
        .status
}

fn error_code(err: ServiceError) -> ErrorCode {
    AppError::from(err).code
}

// ── Activation ──

#[sqlx::test(migrations = "./migrations")]
async fn scan_activates_available_table(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    let outcome = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();

    assert!(outcome.created);
    assert_eq!(outcome.order.status, OrderStatus::Ordered);
    assert_eq!(outcome.order.table_id, table.id);
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Occupied);
}

#[sqlx::test(migrations = "./migrations")]
async fn rescan_resumes_active_session(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    let first = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();
    let second = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();

    assert!(!second.created);
    assert_eq!(second.order.id, first.order.id);

    // Still exactly one active order for the table
    let active = db::orders::find_active_by_table(&pool, &table.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, first.order.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn scan_rejects_unavailable_table(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    lifecycle::set_table_availability(&pool, &restaurant, &table.id, false)
        .await
        .unwrap();

    let err = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap_err();
    assert_eq!(error_code(err), ErrorCode::TableUnavailable);
    assert!(
        db::orders::find_active_by_table(&pool, &table.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn activation_rolls_back_as_one_transaction(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    // Replay the activation writes but drop the transaction before the
    // table update commits: neither write may survive.
    let order_id = db::new_id();
    {
        let mut tx = pool.begin().await.unwrap();
        let now = util::now_millis();
        db::orders::insert(
            &mut *tx,
            &shared::models::Order {
                id: order_id.clone(),
                restaurant_id: restaurant.clone(),
                table_id: table.id.clone(),
                status: OrderStatus::Ordered,
                customer_name: None,
                created_at: now,
                updated_at: now,
            },
        )
        .await
        .unwrap();
        // Fault injected here — transaction dropped without commit
    }

    assert!(db::orders::find_by_id(&pool, &order_id).await.unwrap().is_none());
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Available);

    // The table can still be activated normally afterwards
    let outcome = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();
    assert!(outcome.created);
}

// ── Reservation ──

#[sqlx::test(migrations = "./migrations")]
async fn reserve_sets_pending_order_and_reserved_table(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    let order = lifecycle::reserve(&pool, &restaurant, &table.id, "Tanaka")
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.customer_name.as_deref(), Some("Tanaka"));
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Reserved);
}

#[sqlx::test(migrations = "./migrations")]
async fn double_reservation_is_rejected_without_state_change(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    let first = lifecycle::reserve(&pool, &restaurant, &table.id, "Tanaka")
        .await
        .unwrap();

    let err = lifecycle::reserve(&pool, &restaurant, &table.id, "Suzuki")
        .await
        .unwrap_err();
    let err = AppError::from(err);
    assert_eq!(err.code, ErrorCode::TableOccupied);
    assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);

    // No state change: still exactly the first PENDING order, table
    // still RESERVED
    let active = db::orders::find_active_by_table(&pool, &table.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, first.id);
    assert_eq!(active.customer_name.as_deref(), Some("Tanaka"));
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Reserved);
}

#[sqlx::test(migrations = "./migrations")]
async fn reserving_occupied_table_is_forbidden(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();

    let err = lifecycle::reserve(&pool, &restaurant, &table.id, "Tanaka")
        .await
        .unwrap_err();
    let err = AppError::from(err);
    assert_eq!(err.code, ErrorCode::TableOccupied);
    assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn confirm_reservation_moves_to_ordered_and_occupied(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let order = lifecycle::reserve(&pool, &restaurant, &table.id, "Tanaka")
        .await
        .unwrap();

    let order = lifecycle::confirm_reservation(&pool, &restaurant, &order.id)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Ordered);
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Occupied);
}

// ── Full visit ──

#[sqlx::test(migrations = "./migrations")]
async fn full_visit_and_second_scan(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    // Scan → ORDERED / OCCUPIED
    let o1 = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;
    assert_eq!(o1.status, OrderStatus::Ordered);
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Occupied);

    // Bill requested → PAYMENT_REQUESTED, table unchanged
    let o1 = lifecycle::request_payment(&pool, &o1.id).await.unwrap();
    assert_eq!(o1.status, OrderStatus::PaymentRequested);
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Occupied);

    // Payment recorded → COMPLETED, table freed
    let o1 = lifecycle::complete(&pool, &restaurant, &o1.id).await.unwrap();
    assert_eq!(o1.status, OrderStatus::Completed);
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Available);

    // A second scan now opens a fresh order
    let o2 = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();
    assert!(o2.created);
    assert_ne!(o2.order.id, o1.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn cancel_pending_keeps_history_and_frees_table(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let order = lifecycle::reserve(&pool, &restaurant, &table.id, "Tanaka")
        .await
        .unwrap();

    let cancelled = lifecycle::cancel(&pool, &order.id).await.unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(table_status(&pool, &table.id).await, TableStatus::Available);

    // Still queryable as history
    let history = db::orders::list_by_restaurant(&pool, &restaurant, 50, 0)
        .await
        .unwrap();
    assert!(history.iter().any(|o| o.id == order.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn cancel_after_bill_requested_is_rejected(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let order = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;
    lifecycle::request_payment(&pool, &order.id).await.unwrap();

    let err = lifecycle::cancel(&pool, &order.id).await.unwrap_err();
    assert_eq!(error_code(err), ErrorCode::InvalidStatusTransition);
}

#[sqlx::test(migrations = "./migrations")]
async fn complete_requires_payment_requested(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let order = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;

    let err = lifecycle::complete(&pool, &restaurant, &order.id)
        .await
        .unwrap_err();
    assert_eq!(error_code(err), ErrorCode::InvalidStatusTransition);

    // Completing twice is reported as already completed
    lifecycle::request_payment(&pool, &order.id).await.unwrap();
    lifecycle::complete(&pool, &restaurant, &order.id).await.unwrap();
    let err = lifecycle::complete(&pool, &restaurant, &order.id)
        .await
        .unwrap_err();
    assert_eq!(error_code(err), ErrorCode::OrderAlreadyCompleted);
}

// ── Availability toggle ──

#[sqlx::test(migrations = "./migrations")]
async fn availability_toggle_requires_idle_table(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;

    // AVAILABLE → UNAVAILABLE → AVAILABLE
    let t = lifecycle::set_table_availability(&pool, &restaurant, &table.id, false)
        .await
        .unwrap();
    assert_eq!(t.status, TableStatus::Unavailable);
    let t = lifecycle::set_table_availability(&pool, &restaurant, &table.id, true)
        .await
        .unwrap();
    assert_eq!(t.status, TableStatus::Available);

    // Occupied tables cannot be toggled
    lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap();
    let err = lifecycle::set_table_availability(&pool, &restaurant, &table.id, false)
        .await
        .unwrap_err();
    assert_eq!(error_code(err), ErrorCode::TableOccupied);
}

// ── Order requests ──

#[sqlx::test(migrations = "./migrations")]
async fn placed_request_snapshots_menu_prices(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let item_id = seed_menu_item(&pool, &restaurant, "Ramen", 900).await;
    let order = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;

    let request = requests::place_request(
        &pool,
        &order.id,
        &[CartItem {
            menu_item_id: item_id.clone(),
            quantity: 2,
            option_ids: vec![],
        }],
    )
    .await
    .unwrap();

    assert_eq!(request.status, OrderRequestStatus::Placed);
    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].unit_price, 900);

    // A later menu price change must not rewrite the snapshot
    db::menu::update_item(
        &pool,
        &restaurant,
        &item_id,
        &shared::models::MenuItemUpdate {
            category_id: None,
            name: None,
            description: None,
            price: Some(1200),
            sold_out: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let reloaded = db::order_requests::find_by_id(&pool, &request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.items[0].unit_price, 900);
    assert_eq!(reloaded.items[0].name, "Ramen");
}

#[sqlx::test(migrations = "./migrations")]
async fn rejection_banner_is_dismissed_exactly_once(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let item_id = seed_menu_item(&pool, &restaurant, "Gyoza", 450).await;
    let order = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;
    let request = requests::place_request(
        &pool,
        &order.id,
        &[CartItem {
            menu_item_id: item_id,
            quantity: 1,
            option_ids: vec![],
        }],
    )
    .await
    .unwrap();

    let rejected = requests::reject_request(&pool, &restaurant, &request.id, "Out of stock")
        .await
        .unwrap();
    assert_eq!(rejected.status, OrderRequestStatus::Cancelled);
    assert!(!rejected.rejection_displayed);

    let shown = requests::mark_rejection_displayed(&pool, &order.id, &request.id)
        .await
        .unwrap();
    assert!(shown.rejection_displayed);

    // Second dismissal is a no-op, not an error
    let again = requests::mark_rejection_displayed(&pool, &order.id, &request.id)
        .await
        .unwrap();
    assert!(again.rejection_displayed);
}

#[sqlx::test(migrations = "./migrations")]
async fn requests_on_terminal_order_are_gone(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let item_id = seed_menu_item(&pool, &restaurant, "Beer", 600).await;
    let order = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;
    lifecycle::cancel(&pool, &order.id).await.unwrap();

    let err = requests::place_request(
        &pool,
        &order.id,
        &[CartItem {
            menu_item_id: item_id,
            quantity: 1,
            option_ids: vec![],
        }],
    )
    .await
    .unwrap_err();
    let err = AppError::from(err);
    assert_eq!(err.code, ErrorCode::Gone);
    assert_eq!(err.http_status(), http::StatusCode::GONE);
}

#[sqlx::test(migrations = "./migrations")]
async fn completing_order_closes_accepted_requests(pool: PgPool) {
    let restaurant = seed_restaurant(&pool).await;
    let table = seed_table(&pool, &restaurant, 1).await;
    let item_id = seed_menu_item(&pool, &restaurant, "Curry", 800).await;
    let order = lifecycle::activate_by_scan(&pool, &table.qr_token)
        .await
        .unwrap()
        .order;
    let request = requests::place_request(
        &pool,
        &order.id,
        &[CartItem {
            menu_item_id: item_id,
            quantity: 1,
            option_ids: vec![],
        }],
    )
    .await
    .unwrap();
    requests::accept_request(&pool, &restaurant, &request.id)
        .await
        .unwrap();

    lifecycle::request_payment(&pool, &order.id).await.unwrap();
    lifecycle::complete(&pool, &restaurant, &order.id).await.unwrap();

    let reloaded = db::order_requests::find_by_id(&pool, &request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, OrderRequestStatus::Completed);
}
