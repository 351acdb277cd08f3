pub mod document;
pub mod media;
pub mod security;
pub mod timestamp;

pub use document::{
    Document, DocumentClient, ListOptions, ListResult, Metadata, RepositoryError, RepositoryResult,
    Sort, SortOrder,
};
pub use document::query::Condition;
pub use media::{MediaError, MediaStore, MediaUpload};
pub use security::AuthenticatedUser;
