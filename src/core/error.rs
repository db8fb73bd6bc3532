use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by settings I/O and command plumbing.
#[derive(Debug, Error)]
pub enum HookwireError {
    #[error("Cannot find home directory")]
    HomeDirNotFound,

    #[error("Cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HookwireError>;
