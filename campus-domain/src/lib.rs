pub mod content;

pub use content::{
    CareerDetails, ContentItem, ContentSummary, Excerpt, ParseKindError, ResourceKind,
};
