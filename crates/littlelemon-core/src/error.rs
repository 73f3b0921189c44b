//! Error types for the Little Lemon provisioner

use thiserror::Error;

/// Result type alias using this crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Provisioner error types with helpful messages
#[derive(Error, Debug)]
pub enum Error {
    // Database errors (E100-E199)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database '{0}' does not exist. Run `littlelemon setup` to create it.")]
    DatabaseMissing(String),

    // Config errors (E200-E299)
    #[error("Configuration error: {0}")]
    Config(String),

    // Input errors (E300-E399)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // I/O errors (E400-E499)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "E100",
            Self::DatabaseMissing(_) => "E101",
            Self::Config(_) => "E200",
            Self::InvalidInput(_) => "E300",
            Self::Io(_) => "E400",
        }
    }
}
