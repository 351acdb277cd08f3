use thiserror::Error;

/// 存储层错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 违反唯一索引
    #[error("duplicate value for unique field: {0}")]
    Conflict(String),

    /// 文档ID格式不合法
    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// 数据库不可用或执行失败
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
