//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (required) | PostgreSQL 连接串 |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (required outside development) | 会话令牌密钥 |
/// | GATEWAY_API_URL | https://api.pay.example.com | 支付网关地址 |
/// | IMAGE_S3_BUCKET | order-server-images | 菜单图片存储桶 |
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for restaurant session tokens
    pub jwt_secret: String,
    /// SES sender email address
    pub ses_from_email: String,
    /// Payment gateway base URL
    pub gateway_api_url: String,
    /// Payment gateway API key
    pub gateway_api_key: String,
    /// Payment gateway webhook signing secret
    pub gateway_webhook_secret: String,
    /// S3 bucket for menu/category images
    pub image_s3_bucket: String,
    /// Base URL the client app is served from (QR links, redirect hints)
    pub app_base_url: String,
    /// Read-cache TTL in seconds
    pub cache_ttl_secs: u64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: environment.clone(),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@order.example.com".into()),
            gateway_api_url: std::env::var("GATEWAY_API_URL")
                .unwrap_or_else(|_| "https://api.pay.example.com".into()),
            gateway_api_key: Self::require_secret("GATEWAY_API_KEY", &environment)?,
            gateway_webhook_secret: Self::require_secret("GATEWAY_WEBHOOK_SECRET", &environment)?,
            image_s3_bucket: std::env::var("IMAGE_S3_BUCKET")
                .unwrap_or_else(|_| "order-server-images".into()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "https://order.example.com".into()),
            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60),
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
