//! Entity models shared between server and clients

pub mod menu;
pub mod order;
pub mod order_request;
pub mod payment;
pub mod plan;
pub mod restaurant;
pub mod subscription;
pub mod table;

pub use menu::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate,
    MenuItemOption, MenuItemOptionCreate, MenuItemUpdate,
};
pub use order::Order;
pub use order_request::{CartItem, OrderItem, OrderItemOption, OrderRequest};
pub use payment::Payment;
pub use plan::Plan;
pub use restaurant::{Restaurant, RestaurantUpdate};
pub use subscription::Subscription;
pub use table::{RestaurantTable, TableCreate, TableUpdate};
