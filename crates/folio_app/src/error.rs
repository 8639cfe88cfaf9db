//! Error types for folio_app

use std::path::PathBuf;

use folio_content::ContentError;
use thiserror::Error;

/// Errors that can occur while setting up or driving a page
#[derive(Error, Debug)]
pub enum AppError {
    /// No configuration file in the directory
    #[error("no folio.toml found in {}, run `folio init` to create one", .dir.display())]
    ConfigNotFound { dir: PathBuf },

    /// Configuration file could not be read or written
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid
    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be serialized
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Content catalog error
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, AppError>;
