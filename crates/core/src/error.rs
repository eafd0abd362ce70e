//! Error types for bx-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for bx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bx-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input (empty bucket name, empty folder name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Named profile missing from the credentials file
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// No usable credentials could be resolved
    #[error("No credentials: {0}")]
    NoCredentials(String),

    /// Connect-time transport failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// List-time transport failure
    #[error("Listing error: {0}")]
    Listing(String),

    /// Per-item download or upload failure
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Per-item delete failure
    #[error("Delete failed: {0}")]
    Delete(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Validation(_) => 2, // UsageError
            Error::Connection(_) | Error::Listing(_) => 3, // NetworkError
            Error::NoCredentials(_) => 4,                 // AuthError
            Error::ProfileNotFound(_) => 5,               // NotFound
            _ => 1,                                       // GeneralError
        }
    }
}
