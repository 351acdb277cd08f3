use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use campus_service::AccessToken;
use serde::Deserialize;
use utoipa::ToSchema;

/// 登录请求
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 管理员登录
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "返回Bearer令牌"),
        (status = 401, description = "用户名或密码错误")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccessToken>, ApiError> {
    let token = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(token))
}
