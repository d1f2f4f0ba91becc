use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BossError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("no catalog entry for {0}")]
    NotFound(String),

    #[error("data-id store unavailable at {path}: {reason}")]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("encrypt {file}: {reason}")]
    Encryption { file: String, reason: String },

    #[error("no ciphertext for {0}")]
    MissingCiphertext(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, BossError>;
