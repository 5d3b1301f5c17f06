//! Error types for meaconv

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while converting or packaging measurement files
///
/// Line-level problems never show up here: malformed rows are absorbed by the
/// row classifier. Only file-level and packaging failures are reported.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File name {0:?} has no usable stem")]
    InvalidFileName(String),

    #[error("File {name:?} is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Config file {0:?} does not exist")]
    ConfigNotFound(PathBuf),

    #[error("Config failed to parse YAML: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
