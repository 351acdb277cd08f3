pub mod auth;
pub mod health;
pub mod resources;

pub use auth::*;
pub use health::*;
pub use resources::*;
