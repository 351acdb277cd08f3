pub mod file_validator;
pub mod policy;
pub mod resource_mapping;
pub mod storage;

pub use file_validator::FileTypeValidator;
pub use policy::{UploadPolicy, UploadViolation};
pub use resource_mapping::ResourceMapping;
pub use storage::LocalMediaStore;
