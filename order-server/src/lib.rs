//! QR table-ordering service
//!
//! Customers scan a per-table QR code to open an order session and
//! submit carts; owners manage menus, tables and reservations from a
//! dashboard; plan subscriptions are paid through a payment gateway.
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── config.rs      # 环境变量配置
//! ├── state.rs       # 共享状态 (连接池、AWS 客户端、缓存)
//! ├── error.rs       # ServiceError (sqlx → 错误分类)
//! ├── auth/          # 会话令牌、中间件
//! ├── db/            # 每个实体的数据访问函数
//! ├── orders/        # 订单/桌台状态机事务 (core)
//! ├── api/           # HTTP 路由和处理器
//! ├── gateway.rs     # 支付网关 REST 客户端
//! ├── email.rs       # SES 邮件
//! ├── storage.rs     # S3 图片存储
//! └── cache.rs       # 会话级读缓存
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod gateway;
pub mod orders;
pub mod state;
pub mod storage;

// Re-export 公共类型
pub use api::create_router;
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
