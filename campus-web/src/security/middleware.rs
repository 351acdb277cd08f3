use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

/// 从Authorization头提取Bearer令牌
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 认证中间件
/// 校验Bearer令牌，将用户信息注入请求扩展，未认证的请求返回401
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;
    let user = state.auth_service.authenticate(token)?;
    if !user.is_admin() {
        return Err(ApiError::Unauthorized(
            "administrator role required".to_string(),
        ));
    }

    debug!(username = %user.username, path = %request.uri().path(), "request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
