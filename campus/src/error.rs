use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] campus_infra::logging::LoggingError),

    #[error("Startup error: {0}")]
    Startup(#[from] campus_service::ServiceError),
}

pub type Result<T> = std::result::Result<T, CampusError>;
