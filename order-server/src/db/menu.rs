//! Menu database operations (categories, items, options)

use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate,
    MenuItemOption, MenuItemUpdate,
};
use shared::util;
use sqlx::PgPool;

const CATEGORY_COLUMNS: &str = "id, restaurant_id, name, sort_order, image_key, created_at";
const ITEM_COLUMNS: &str =
    "id, restaurant_id, category_id, name, description, price, image_key, sold_out, sort_order, created_at";

// ── Categories ──

pub async fn list_categories(
    pool: &PgPool,
    restaurant_id: &str,
) -> Result<Vec<MenuCategory>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM menu_categories
         WHERE restaurant_id = $1 ORDER BY sort_order, name"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

pub async fn find_category(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
) -> Result<Option<MenuCategory>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM menu_categories
         WHERE id = $1 AND restaurant_id = $2"
    ))
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(
    pool: &PgPool,
    restaurant_id: &str,
    data: &MenuCategoryCreate,
) -> Result<MenuCategory, sqlx::Error> {
    let category = MenuCategory {
        id: super::new_id(),
        restaurant_id: restaurant_id.to_string(),
        name: data.name.clone(),
        sort_order: data.sort_order.unwrap_or(0),
        image_key: None,
        created_at: util::now_millis(),
    };

    sqlx::query(
        "INSERT INTO menu_categories (id, restaurant_id, name, sort_order, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&category.id)
    .bind(&category.restaurant_id)
    .bind(&category.name)
    .bind(category.sort_order)
    .bind(category.created_at)
    .execute(pool)
    .await?;

    Ok(category)
}

pub async fn update_category(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
    data: &MenuCategoryUpdate,
) -> Result<Option<MenuCategory>, sqlx::Error> {
    sqlx::query(
        "UPDATE menu_categories SET
            name = COALESCE($1, name),
            sort_order = COALESCE($2, sort_order)
         WHERE id = $3 AND restaurant_id = $4",
    )
    .bind(&data.name)
    .bind(data.sort_order)
    .bind(id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;

    find_category(pool, restaurant_id, id).await
}

pub async fn set_category_image(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
    image_key: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE menu_categories SET image_key = $1 WHERE id = $2 AND restaurant_id = $3",
    )
    .bind(image_key)
    .bind(id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn count_items_in_category(pool: &PgPool, category_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items WHERE category_id = $1")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn delete_category(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM menu_categories WHERE id = $1 AND restaurant_id = $2")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Items ──

pub async fn list_items(pool: &PgPool, restaurant_id: &str) -> Result<Vec<MenuItem>, sqlx::Error> {
    let mut items: Vec<MenuItem> = sqlx::query_as(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items
         WHERE restaurant_id = $1 ORDER BY sort_order, name"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;

    attach_options(pool, &mut items).await?;
    Ok(items)
}

pub async fn find_item(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
) -> Result<Option<MenuItem>, sqlx::Error> {
    let item: Option<MenuItem> = sqlx::query_as(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = $1 AND restaurant_id = $2"
    ))
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;

    match item {
        Some(mut item) => {
            attach_options(pool, std::slice::from_mut(&mut item)).await?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

pub async fn create_item(
    pool: &PgPool,
    restaurant_id: &str,
    data: &MenuItemCreate,
) -> Result<MenuItem, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut item = MenuItem {
        id: super::new_id(),
        restaurant_id: restaurant_id.to_string(),
        category_id: data.category_id.clone(),
        name: data.name.clone(),
        description: data.description.clone(),
        price: data.price,
        image_key: None,
        sold_out: false,
        sort_order: data.sort_order.unwrap_or(0),
        created_at: util::now_millis(),
        options: Vec::new(),
    };

    sqlx::query(
        "INSERT INTO menu_items (id, restaurant_id, category_id, name, description, price, sold_out, sort_order, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8)",
    )
    .bind(&item.id)
    .bind(&item.restaurant_id)
    .bind(&item.category_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price)
    .bind(item.sort_order)
    .bind(item.created_at)
    .execute(&mut *tx)
    .await?;

    for option in &data.options {
        let option = MenuItemOption {
            id: super::new_id(),
            menu_item_id: item.id.clone(),
            name: option.name.clone(),
            price: option.price,
        };
        sqlx::query(
            "INSERT INTO menu_item_options (id, menu_item_id, name, price) VALUES ($1, $2, $3, $4)",
        )
        .bind(&option.id)
        .bind(&option.menu_item_id)
        .bind(&option.name)
        .bind(option.price)
        .execute(&mut *tx)
        .await?;
        item.options.push(option);
    }

    tx.commit().await?;
    Ok(item)
}

pub async fn update_item(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
    data: &MenuItemUpdate,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query(
        "UPDATE menu_items SET
            category_id = COALESCE($1, category_id),
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            sold_out = COALESCE($5, sold_out),
            sort_order = COALESCE($6, sort_order)
         WHERE id = $7 AND restaurant_id = $8",
    )
    .bind(&data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.sold_out)
    .bind(data.sort_order)
    .bind(id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;

    find_item(pool, restaurant_id, id).await
}

pub async fn set_item_image(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
    image_key: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE menu_items SET image_key = $1 WHERE id = $2 AND restaurant_id = $3")
        .bind(image_key)
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_item(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = $1 AND restaurant_id = $2")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Options ──

pub async fn find_options_by_ids(
    pool: &PgPool,
    menu_item_id: &str,
    option_ids: &[String],
) -> Result<Vec<MenuItemOption>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, menu_item_id, name, price FROM menu_item_options
         WHERE menu_item_id = $1 AND id = ANY($2)",
    )
    .bind(menu_item_id)
    .bind(option_ids)
    .fetch_all(pool)
    .await
}

async fn attach_options(pool: &PgPool, items: &mut [MenuItem]) -> Result<(), sqlx::Error> {
    let item_ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
    if item_ids.is_empty() {
        return Ok(());
    }

    let options: Vec<MenuItemOption> = sqlx::query_as(
        "SELECT id, menu_item_id, name, price FROM menu_item_options
         WHERE menu_item_id = ANY($1) ORDER BY name",
    )
    .bind(&item_ids)
    .fetch_all(pool)
    .await?;

    for item in items.iter_mut() {
        item.options = options
            .iter()
            .filter(|o| o.menu_item_id == item.id)
            .cloned()
            .collect();
    }
    Ok(())
}
