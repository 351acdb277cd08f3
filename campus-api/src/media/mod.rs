use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 待保存的媒体文件
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// 存储目录（按资源类型划分，例如 `blogs`）
    pub folder: String,
    /// multipart中的字段名
    pub field_name: String,
    /// 客户端提供的原始文件名
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl MediaUpload {
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// 原始文件名的扩展名（小写）
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}

/// 媒体存储错误
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid media reference: {0}")]
    InvalidReference(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// MediaStore 保存二进制文件并返回可公开访问的引用
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// 保存文件，返回稳定的引用（URL或路径）
    async fn store(&self, upload: MediaUpload) -> Result<String, MediaError>;

    /// 按引用删除文件，文件已不存在时视为成功
    async fn release(&self, reference: &str) -> Result<(), MediaError>;
}
