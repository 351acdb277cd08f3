pub mod middleware;

pub use middleware::{bearer_token, require_auth};
