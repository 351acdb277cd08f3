use axum::Json;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify,
};

/// OpenAPI文档配置
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::resources::list_published,
        crate::handlers::resources::get_published,
        crate::handlers::resources::admin_list,
        crate::handlers::resources::admin_get,
        crate::handlers::resources::create_item,
        crate::handlers::resources::update_item,
        crate::handlers::resources::delete_item,
    ),
    components(schemas(crate::handlers::auth::LoginRequest)),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "健康检查端点"),
        (name = "auth", description = "认证相关端点"),
        (name = "content", description = "博客、图库、公告与招聘信息端点"),
    ),
    info(
        title = "Campus API",
        description = "学校网站内容管理服务",
        version = "0.1.0"
    ),
    servers(
        (url = "http://localhost:5000", description = "本地开发服务器"),
    )
)]
pub struct ApiDoc;

/// 安全配置修改器
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
