//! Единый тип ошибок публичного API.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DossioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected JSON shape: expected {0}")]
    UnexpectedShape(&'static str),

    #[error("record carries neither legacy nor REST marker keys")]
    UnknownDialect,

    #[error("API envelope rejected: {message}")]
    Envelope {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },
}

impl DossioError {
    pub(crate) fn envelope(message: impl Into<String>) -> Self {
        DossioError::Envelope {
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DossioError>;
