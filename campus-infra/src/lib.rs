pub mod database;
pub mod logging;
pub mod media;
pub mod security;

pub use database::{DatabaseManager, InMemoryDocumentClient, MongoDocumentClient};
pub use media::{FileTypeValidator, LocalMediaStore, UploadPolicy, UploadViolation};
pub use security::JwtService;
