use crate::media::ResourceMapping;
use async_trait::async_trait;
use campus_api::media::{MediaError, MediaStore, MediaUpload};
use chrono::Utc;
use rand::Rng;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// 本地文件存储实现
pub struct LocalMediaStore {
    mapping: ResourceMapping,
}

impl LocalMediaStore {
    pub fn new(base_path: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            mapping: ResourceMapping::new(public_prefix, base_path),
        }
    }

    pub fn mapping(&self) -> &ResourceMapping {
        &self.mapping
    }

    /// 生成存储文件名：`{field}-{unix_millis}-{random}.{ext}`
    fn file_name(upload: &MediaUpload) -> String {
        let field = sanitize(&upload.field_name);
        let field = if field.is_empty() { "file".to_string() } else { field };
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let name = format!("{}-{}-{}", field, Utc::now().timestamp_millis(), suffix);
        match upload.extension().map(|ext| sanitize(&ext)) {
            Some(ext) if !ext.is_empty() => format!("{}.{}", name, ext),
            _ => name,
        }
    }
}

/// 只保留字母、数字、`-` 与 `_`
fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// 写入失败时删除可能残留的部分文件，并返回原始错误
async fn discard_partial(path: &Path, written: io::Result<()>) -> Result<(), MediaError> {
    let err = match written {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    match fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "partial media file removed"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove partial media file"),
    }
    Err(err.into())
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, upload: MediaUpload) -> Result<String, MediaError> {
        let folder = sanitize(&upload.folder);
        if folder.is_empty() {
            return Err(MediaError::Storage(format!(
                "invalid media folder '{}'",
                upload.folder
            )));
        }

        let relative = format!("{}/{}", folder, Self::file_name(&upload));
        let full_path = self.mapping.location().join(&relative);

        // 创建父目录
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let written = fs::write(&full_path, &upload.content).await;
        discard_partial(&full_path, written).await?;

        let reference = self.mapping.to_reference(&relative);
        debug!(reference = %reference, size = upload.size(), "media stored");
        Ok(reference)
    }

    async fn release(&self, reference: &str) -> Result<(), MediaError> {
        let full_path = self.mapping.resolve_path(reference)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(reference, "media released");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::TempDir;

    fn upload(field: &str, file_name: &str) -> MediaUpload {
        MediaUpload {
            folder: "blogs".to_string(),
            field_name: field.to_string(),
            file_name: file_name.to_string(),
            content_type: Some("image/png".to_string()),
            content: Bytes::from_static(b"\x89PNG fake"),
        }
    }

    #[tokio::test]
    async fn test_store_and_release() {
        let dir = TempDir::new().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/uploads");

        let reference = store.store(upload("image", "Cover.PNG")).await.unwrap();
        assert!(reference.starts_with("/uploads/blogs/image-"));
        assert!(reference.ends_with(".png"));

        let path = store.mapping().resolve_path(&reference).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");

        store.release(&reference).await.unwrap();
        assert!(!path.exists());
        // 文件已不存在时仍视为成功
        store.release(&reference).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_generates_distinct_names() {
        let dir = TempDir::new().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/uploads");

        let first = store.store(upload("image", "a.png")).await.unwrap();
        let second = store.store(upload("image", "a.png")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_release_rejects_references_outside_root() {
        let dir = TempDir::new().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/uploads");

        let err = store.release("/uploads/../Cargo.toml").await.unwrap_err();
        assert!(matches!(err, MediaError::InvalidReference(_)));
        let err = store.release("/static/logo.png").await.unwrap_err();
        assert!(matches!(err, MediaError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image-partial.png");
        std::fs::write(&path, b"\x89PN").unwrap();

        let failed = Err(io::Error::new(ErrorKind::WriteZero, "disk full"));
        let err = discard_partial(&path, failed).await.unwrap_err();
        assert!(matches!(err, MediaError::Io(_)));
        assert!(!path.exists());

        // 文件从未创建时只返回原始错误
        let failed = Err(io::Error::new(ErrorKind::PermissionDenied, "read-only"));
        assert!(discard_partial(&path, failed).await.is_err());

        discard_partial(&path, Ok(())).await.unwrap();
    }
}
