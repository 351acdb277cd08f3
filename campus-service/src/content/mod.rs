pub mod input;
pub mod query;
pub mod resource_service;


pub use input::{
    CreateContentForm, CreateContentInput, FlagField, TagsField, UpdateContentForm,
    UpdateContentInput,
};
pub use query::{ContentQuery, ListScope};
pub use resource_service::{DefaultResourceService, ResourceService};
