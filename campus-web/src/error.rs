use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campus_service::{AuthError, ServiceError, UploadError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// HTTP层错误
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Unauthorized(String),

    /// 请求体格式错误
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::Conflict { .. } => StatusCode::CONFLICT,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Upload(UploadError::Rejected(_)) => StatusCode::BAD_REQUEST,
                ServiceError::Upload(UploadError::Storage(_)) => StatusCode::BAD_GATEWAY,
                ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Service(e) => e.kind(),
            Self::Unauthorized(_) => "Unauthorized",
            Self::BadRequest(_) => "BadRequest",
            Self::PayloadTooLarge(_) => "PayloadTooLarge",
            Self::NotFound(_) => "NotFoundError",
            Self::Internal(_) => "InternalError",
        }
    }

    /// 返回给客户端的信息，内部错误细节只记录日志
    fn public_message(&self) -> String {
        match self {
            Self::Service(ServiceError::Persistence(_)) | Self::Internal(_) => {
                "internal server error".to_string()
            }
            Self::Service(ServiceError::Upload(UploadError::Storage(_))) => {
                "media storage failed".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::Token(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "request failed");
        }
        let body = json!({
            "error": self.kind(),
            "message": self.public_message(),
        });
        (status, Json(body)).into_response()
    }
}
