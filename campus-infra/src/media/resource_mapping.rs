use campus_api::media::MediaError;
use std::path::{Component, Path, PathBuf};

/// 资源映射配置
/// 用于在公开引用（如 `/uploads/blogs/a.png`）与上传目录中的文件路径之间转换
#[derive(Debug, Clone)]
pub struct ResourceMapping {
    /// 公开路径前缀（如：/uploads）
    public_prefix: String,

    /// 本地文件系统根目录
    location: PathBuf,
}

impl ResourceMapping {
    pub fn new(public_prefix: &str, location: impl Into<PathBuf>) -> Self {
        let public_prefix = format!("/{}", public_prefix.trim_matches('/'));
        Self {
            public_prefix,
            location: location.into(),
        }
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// 由相对路径生成公开引用
    pub fn to_reference(&self, relative: &str) -> String {
        format!("{}/{}", self.public_prefix, relative.trim_start_matches('/'))
    }

    /// 解析引用到本地文件系统路径，拒绝前缀之外的引用与 `..`
    pub fn resolve_path(&self, reference: &str) -> Result<PathBuf, MediaError> {
        let invalid = || MediaError::InvalidReference(reference.to_string());

        let relative = reference
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .ok_or_else(invalid)?;

        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(invalid());
        }
        Ok(self.location.join(relative))
    }
}
