//! Application state

use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;
use sqlx::PgPool;
use std::time::Duration;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::gateway::GatewayClient;
use crate::storage::ImageStorage;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// AWS SES client for sending emails
    pub ses: SesClient,
    /// SES sender email address
    pub ses_from_email: String,
    /// Payment gateway client
    pub gateway: GatewayClient,
    /// Gateway webhook signing secret
    pub gateway_webhook_secret: String,
    /// Menu/category image storage
    pub images: ImageStorage,
    /// JWT secret for restaurant sessions
    pub jwt_secret: String,
    /// Per-session read-response cache
    pub cache: ResponseCache,
    /// Base URL the client app is served from
    pub app_base_url: String,
}

impl AppState {
    /// Create a new AppState: connect the pool, run migrations, build
    /// the AWS clients
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = SesClient::new(&aws_config);
        let s3 = S3Client::new(&aws_config);

        Ok(Self {
            pool,
            ses,
            ses_from_email: config.ses_from_email.clone(),
            gateway: GatewayClient::new(
                config.gateway_api_url.clone(),
                config.gateway_api_key.clone(),
            ),
            gateway_webhook_secret: config.gateway_webhook_secret.clone(),
            images: ImageStorage::new(s3, config.image_s3_bucket.clone()),
            jwt_secret: config.jwt_secret.clone(),
            cache: ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)),
            app_base_url: config.app_base_url.clone(),
        })
    }
}
