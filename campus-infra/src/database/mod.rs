pub mod filter;
pub mod manager;
pub mod matcher;
pub mod memory;
pub mod mongo;

#[cfg(test)]
mod tests;

pub use manager::DatabaseManager;
pub use memory::InMemoryDocumentClient;
pub use mongo::MongoDocumentClient;
