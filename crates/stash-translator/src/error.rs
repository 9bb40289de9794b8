//! Translator error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("Unknown translator: {0}")]
    UnknownKind(String),

    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),
}
