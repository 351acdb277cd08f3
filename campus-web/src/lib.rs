pub mod app_state;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod security;

#[cfg(test)]
mod tests;

pub use app_state::AppState;
pub use error::ApiError;
pub use handlers::*;
pub use router::{create_router, RouterConfig};
pub use security::require_auth;
