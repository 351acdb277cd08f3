pub mod content_payload;

pub use content_payload::{ContentPayload, IMAGE_FIELD};
