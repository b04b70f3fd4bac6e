use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for annofactory operations.
#[derive(Debug, Error)]
pub enum AnnofactoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid annotation record: {0}")]
    Validation(#[from] ValidationError),

    #[error("{mode} writer has not been initialised")]
    InvalidState { mode: &'static str },

    #[error("Failed to parse VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Failed to parse YOLO label {path} line {line}: {message}")]
    YoloLabelParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(
        "Class index {index} in {path} line {line} is out of range for class list with {len} class(es)"
    )]
    ClassIndexOutOfRange {
        path: PathBuf,
        line: usize,
        index: usize,
        len: usize,
    },

    #[error("Failed to parse annotation records from {path}: {source}")]
    RecordJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write annotation records to {path}: {source}")]
    RecordJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
