//! Error types for the chat client.
use thiserror::Error;

/// Failure of a single chat request. Never escapes the worker: every variant
/// is turned into an assistant-shaped message for the user.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to prepare storage location: {0}")]
    Io(#[from] std::io::Error),
}
