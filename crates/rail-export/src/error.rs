//! Error type for rail-export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no rows to write for {0}")]
    EmptyOutput(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
