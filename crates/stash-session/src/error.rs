//! Session error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(
        "Argument with value \"{}\" given to \"{operation}\" should be an existing and writable directory",
        .path.display()
    )]
    InvalidSavePath {
        path: PathBuf,
        operation: &'static str,
    },

    #[error("No active session")]
    NoActiveSession,

    #[error("Session already started, cannot assign id")]
    AlreadyActive,

    /// Failure reported by a host session mechanism, passed through unchanged
    #[error("Session host error: {0}")]
    Host(String),

    #[error("Translator error: {0}")]
    Translator(#[from] stash_translator::TranslatorError),
}
