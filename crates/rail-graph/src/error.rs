//! Graph-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("station not found: {0}")]
    StationNotFound(String),

    #[error("station {0} has no graph nodes")]
    StationIsolated(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
