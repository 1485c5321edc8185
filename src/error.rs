//! Error types for the attachment-filer application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Collaborator errors
    #[error("Mailbox error: {0}")]
    Mailbox(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const MAILBOX_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const STORAGE_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
