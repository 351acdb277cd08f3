use async_trait::async_trait;
use campus_api::security::{AuthenticatedUser, ROLE_ADMIN};
use campus_infra::security::JwtService;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// 认证错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("failed to issue token: {0}")]
    Token(String),
}

/// 登录成功后返回的令牌
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// 有效期（秒）
    pub expires_in: u64,
}

/// 认证服务trait
#[async_trait]
pub trait AuthService: Send + Sync {
    /// 使用管理员凭据登录
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// 验证Bearer令牌
    fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// 默认认证服务，校验配置中的单个管理员账号
pub struct DefaultAuthService {
    jwt_service: Arc<JwtService>,
    admin_username: String,
    /// bcrypt哈希
    admin_password_hash: String,
}

impl DefaultAuthService {
    pub fn new(
        jwt_service: Arc<JwtService>,
        admin_username: impl Into<String>,
        admin_password_hash: impl Into<String>,
    ) -> Self {
        Self {
            jwt_service,
            admin_username: admin_username.into(),
            admin_password_hash: admin_password_hash.into(),
        }
    }

    fn verify_password(&self, password: &str) -> bool {
        if self.admin_password_hash.is_empty() {
            warn!("admin password hash is not configured, login disabled");
            return false;
        }
        bcrypt::verify(password, &self.admin_password_hash).unwrap_or_else(|e| {
            warn!(error = %e, "failed to verify admin password hash");
            false
        })
    }
}

#[async_trait]
impl AuthService for DefaultAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        if username != self.admin_username || !self.verify_password(password) {
            warn!(username, "rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .jwt_service
            .generate(username, vec![ROLE_ADMIN.to_string()])
            .map_err(|e| AuthError::Token(e.to_string()))?;
        info!(username, "admin logged in");
        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.expiration(),
        })
    }

    fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self
            .jwt_service
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(claims.sub, claims.roles))
    }
}
