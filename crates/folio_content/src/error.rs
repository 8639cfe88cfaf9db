//! Error types for folio_content

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a content catalog
#[derive(Error, Debug)]
pub enum ContentError {
    /// Catalog file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not valid TOML or does not match the schema
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// Skill level outside 0..=100
    #[error("skill '{skill}' has level {level}, expected 0-100")]
    InvalidLevel { skill: String, level: u8 },

    /// Two projects share an id
    #[error("duplicate project id {0}")]
    DuplicateProject(u32),
}

/// Result type for folio_content operations
pub type Result<T> = std::result::Result<T, ContentError>;
