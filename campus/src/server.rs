use crate::config::{Config, DatabaseBackend};
use crate::error::Result;
use campus_api::MediaStore;
use campus_infra::{
    DatabaseManager, InMemoryDocumentClient, JwtService, LocalMediaStore, UploadPolicy,
};
use campus_service::{
    AuthService, DefaultAuthService, DefaultResourceService, ResourceService,
};
use campus_web::{AppState, RouterConfig};
use std::sync::Arc;
use tracing::{info, warn};

/// JWT签发者
const TOKEN_ISSUER: &str = "campus";

/// 初始化应用状态
pub async fn init_app_state(config: &Config) -> Result<AppState> {
    let media_store: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        &config.storage.upload_dir,
        &config.storage.public_prefix,
    ));
    let upload_policy = UploadPolicy::images(config.storage.max_upload_size);

    let resource_service: Arc<dyn ResourceService> = match config.database.backend {
        DatabaseBackend::Mongo => {
            let manager = DatabaseManager::connect(&config.database.url, &config.database.database).await?;
            Arc::new(DefaultResourceService::new(
                Arc::new(manager.document_client()),
                media_store,
                upload_policy,
            ))
        }
        DatabaseBackend::Memory => {
            warn!("Using in-memory document store, data will not survive a restart");
            Arc::new(DefaultResourceService::new(
                Arc::new(InMemoryDocumentClient::new()),
                media_store,
                upload_policy,
            ))
        }
    };
    resource_service.ensure_indexes().await?;
    info!("Slug indexes ensured");

    let jwt_service = Arc::new(JwtService::new(
        &config.security.jwt_secret,
        TOKEN_ISSUER,
        config.security.jwt_expiration,
    ));
    if config.security.admin_password_hash.is_empty() {
        warn!("No admin password hash configured, login is disabled");
    }
    let auth_service: Arc<dyn AuthService> = Arc::new(DefaultAuthService::new(
        jwt_service,
        config.security.admin_username.clone(),
        config.security.admin_password_hash.clone(),
    ));

    Ok(AppState::new(resource_service, auth_service))
}

/// 从配置构建路由参数
pub fn router_config(config: &Config) -> RouterConfig {
    RouterConfig {
        upload_dir: config.storage.upload_dir.clone(),
        public_prefix: config.storage.public_prefix.clone(),
        max_body_size: config.server.max_request_body_size,
        allowed_origins: config.cors.allowed_origins.clone(),
    }
}
