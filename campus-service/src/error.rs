use campus_api::media::MediaError;
use campus_infra::media::UploadViolation;
use thiserror::Error;

/// 上传失败的原因
#[derive(Debug, Error)]
pub enum UploadError {
    /// 文件不符合上传策略
    #[error(transparent)]
    Rejected(#[from] UploadViolation),

    #[error("media storage failed: {0}")]
    Storage(#[from] MediaError),
}

/// 服务层错误
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("an item with slug '{slug}' already exists")]
    Conflict { slug: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 稳定的错误类型标识，用于响应体
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Conflict { .. } => "ConflictError",
            Self::NotFound(_) => "NotFoundError",
            Self::Upload(_) => "UploadError",
            Self::Persistence(_) => "PersistenceError",
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ServiceError::validation("x").kind(), "ValidationError");
        assert_eq!(
            ServiceError::Conflict {
                slug: "hello-world".to_string()
            }
            .kind(),
            "ConflictError"
        );
        let rejected = ServiceError::from(UploadError::from(UploadViolation::Empty));
        assert_eq!(rejected.kind(), "UploadError");
        assert_eq!(rejected.to_string(), "uploaded file is empty");
        let storage = ServiceError::from(UploadError::from(MediaError::Storage("down".into())));
        assert_eq!(storage.kind(), "UploadError");
        assert!(storage.to_string().starts_with("media storage failed"));
    }

    #[test]
    fn test_conflict_message_names_slug() {
        let err = ServiceError::Conflict {
            slug: "hello-world".to_string(),
        };
        assert_eq!(err.to_string(), "an item with slug 'hello-world' already exists");
    }
}
