pub mod content;
pub mod error;
pub mod security;

pub use content::{
    ContentQuery, CreateContentForm, CreateContentInput, DefaultResourceService, ListScope,
    ResourceService, UpdateContentForm, UpdateContentInput,
};
pub use error::{ServiceError, ServiceResult, UploadError};
pub use security::{AccessToken, AuthError, AuthService, DefaultAuthService};
