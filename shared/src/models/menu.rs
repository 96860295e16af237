//! Menu Models (categories, items, options)

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuCategory {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub sort_order: i32,
    /// Object-storage key of the category image
    pub image_key: Option<String>,
    pub created_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryUpdate {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in minor currency units
    pub price: i64,
    pub image_key: Option<String>,
    pub sold_out: bool,
    pub sort_order: i32,
    pub created_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub options: Vec<MenuItemOption>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub options: Vec<MenuItemOptionCreate>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub sold_out: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Selectable option of a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemOption {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    /// Price delta in minor currency units
    pub price: i64,
}

/// Create option payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemOptionCreate {
    pub name: String,
    pub price: i64,
}
