use std::collections::HashSet;

/// 文件类型验证器
#[derive(Debug, Clone, Default)]
pub struct FileTypeValidator {
    /// 允许的MIME类型集合
    allowed_types: HashSet<String>,
    /// 允许的文件扩展名集合
    allowed_extensions: HashSet<String>,
}

impl FileTypeValidator {
    /// 创建新的验证器，不允许任何类型
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加允许的MIME类型
    pub fn allow_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.allowed_types.insert(mime_type.into().to_lowercase());
        self
    }

    /// 添加允许的文件扩展名
    pub fn allow_extension(mut self, ext: impl Into<String>) -> Self {
        self.allowed_extensions.insert(ext.into().to_lowercase());
        self
    }

    /// 添加常见的图片类型
    pub fn allow_images(self) -> Self {
        ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]
            .into_iter()
            .fold(self, |v, mime| v.allow_mime_type(mime))
            .allow_extension("jpg")
            .allow_extension("jpeg")
            .allow_extension("png")
            .allow_extension("gif")
            .allow_extension("webp")
    }

    /// 验证文件类型，MIME类型与扩展名都必须在允许列表中
    pub fn validate(&self, mime_type: Option<&str>, filename: &str) -> bool {
        let mime_allowed = mime_type
            .map(|mime| mime.split(';').next().unwrap_or(mime).trim().to_lowercase())
            .is_some_and(|mime| self.allowed_types.contains(&mime));

        let extension_allowed = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.allowed_extensions.contains(&ext.to_lowercase()));

        mime_allowed && extension_allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_validator() {
        let validator = FileTypeValidator::new().allow_images();

        assert!(validator.validate(Some("image/jpeg"), "test.jpg"));
        assert!(validator.validate(Some("image/png"), "TEST.PNG"));
        assert!(validator.validate(Some("image/webp; charset=binary"), "a.webp"));
        assert!(!validator.validate(Some("application/pdf"), "test.pdf"));
    }

    #[test]
    fn test_both_mime_and_extension_required() {
        let validator = FileTypeValidator::new().allow_images();

        assert!(!validator.validate(Some("image/png"), "script.exe"));
        assert!(!validator.validate(Some("text/html"), "photo.png"));
        assert!(!validator.validate(None, "photo.png"));
        assert!(!validator.validate(Some("image/png"), "no-extension"));
        assert!(!FileTypeValidator::new().validate(Some("image/png"), "a.png"));
    }
}
