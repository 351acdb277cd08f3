pub mod auth_service;

pub use auth_service::{AccessToken, AuthError, AuthService, DefaultAuthService};
