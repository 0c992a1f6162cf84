// Error types for catalog loading, content resolution and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Why an item could not be resolved into content identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Identifier failed path validation
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// `paths` only lists auxiliary resources
    #[error("No content file among the declared paths")]
    NoContentFile,

    /// Item declares neither `path` nor `paths`
    #[error("No valid path found for this example")]
    NoPathFound,
}

/// Catalog document errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document has no top-level catalog key
    #[error("Catalog document is empty")]
    Empty,

    #[error("Invalid category path: {0:?}")]
    InvalidCategoryPath(String),

    #[error("Unexpected catalog shape: {0}")]
    UnexpectedShape(String),
}

/// Static registry lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Identifier not registered: {0}")]
    NotRegistered(String),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}
