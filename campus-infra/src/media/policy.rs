use crate::media::FileTypeValidator;
use campus_api::media::MediaUpload;
use thiserror::Error;

/// 默认最大上传大小（5 MiB）
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// 违反上传策略的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadViolation {
    #[error("uploaded file is empty")]
    Empty,

    #[error("file size {size} exceeds the limit of {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unsupported file type '{file_name}', only JPEG, PNG, GIF and WEBP images are allowed")]
    UnsupportedType { file_name: String },
}

/// UploadPolicy 上传策略：类型白名单与大小限制
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    validator: FileTypeValidator,
    max_size: usize,
}

impl UploadPolicy {
    pub fn new(validator: FileTypeValidator, max_size: usize) -> Self {
        Self {
            validator,
            max_size,
        }
    }

    /// 仅允许图片
    pub fn images(max_size: usize) -> Self {
        Self::new(FileTypeValidator::new().allow_images(), max_size)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn check(&self, upload: &MediaUpload) -> Result<(), UploadViolation> {
        if upload.size() == 0 {
            return Err(UploadViolation::Empty);
        }
        if upload.size() > self.max_size {
            return Err(UploadViolation::TooLarge {
                size: upload.size(),
                max: self.max_size,
            });
        }
        if !self
            .validator
            .validate(upload.content_type.as_deref(), &upload.file_name)
        {
            return Err(UploadViolation::UnsupportedType {
                file_name: upload.file_name.clone(),
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::images(DEFAULT_MAX_UPLOAD_SIZE)
    }
}
