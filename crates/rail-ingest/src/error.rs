use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read {path}: {source}")]
    InputUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} could not be decoded as UTF-8 or EUC-KR/CP949")]
    EncodingUndetected { path: String },

    #[error("no supported column schema detected in {path}")]
    SchemaUndetected { path: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;
