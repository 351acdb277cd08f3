use crate::error::ApiError;
use crate::security::require_auth;
use crate::{handlers, openapi, AppState};
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// 路由配置
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// 上传文件所在目录
    pub upload_dir: PathBuf,
    /// 上传文件的公开路径前缀
    pub public_prefix: String,
    /// 请求体最大字节数
    pub max_body_size: usize,
    /// 为空或包含`*`时允许所有来源
    pub allowed_origins: Vec<String>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}

/// 创建应用路由
pub fn create_router(state: AppState, config: &RouterConfig) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_auth);
    let public_prefix = format!("/{}", config.public_prefix.trim_matches('/'));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        // 认证相关路由
        .route("/api/auth/login", post(handlers::login))
        // 管理路由
        .route(
            "/api/admin/:kind",
            get(handlers::admin_list).route_layer(auth.clone()),
        )
        .route(
            "/api/admin/:kind/:id",
            get(handlers::admin_get).route_layer(auth.clone()),
        )
        // 内容路由：读取公开，写入需要认证
        .route(
            "/api/:kind",
            get(handlers::list_published)
                .merge(post(handlers::create_item).route_layer(auth.clone())),
        )
        .route(
            "/api/:kind/:id",
            get(handlers::get_published).merge(
                put(handlers::update_item)
                    .delete(handlers::delete_item)
                    .route_layer(auth),
            ),
        )
        .nest_service(&public_prefix, ServeDir::new(&config.upload_dir))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origins))
                .layer(DefaultBodyLimit::max(config.max_body_size)),
        )
        .with_state(state)
}
