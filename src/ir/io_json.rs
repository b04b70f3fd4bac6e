//! JSON interchange for annotation records.
//!
//! The on-disk shape is an array of records:
//!
//! ```json
//! [{ "tagId": 0, "tagName": "apples",
//!    "region": { "left": 0.1, "top": 0.2, "width": 0.3, "height": 0.4 } }]
//! ```
//!
//! Every record read goes through [`validate_record`], so a file that
//! parses here is safe to hand to the writer.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use super::model::Annotation;
use crate::error::AnnofactoryError;
use crate::validation::{validate_record, ValidationError};

/// Reads annotation records from a JSON file.
///
/// The top-level value may be an array of records or a single record.
pub fn read_records(path: &Path) -> Result<Vec<Annotation>, AnnofactoryError> {
    let file = File::open(path).map_err(AnnofactoryError::Io)?;
    let reader = BufReader::new(file);

    let value: Value =
        serde_json::from_reader(reader).map_err(|source| AnnofactoryError::RecordJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let records = records_from_value(&value)?;
    log::debug!("read {} record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Writes annotation records to a JSON file as a pretty-printed array.
pub fn write_records(path: &Path, records: &[Annotation]) -> Result<(), AnnofactoryError> {
    let file = File::create(path).map_err(AnnofactoryError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
        AnnofactoryError::RecordJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writeln!(writer).map_err(AnnofactoryError::Io)?;
    writer.flush().map_err(AnnofactoryError::Io)
}

/// Validates and converts an already-parsed JSON value into records.
pub fn records_from_value(value: &Value) -> Result<Vec<Annotation>, ValidationError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| validate_record(item).map_err(|err| err.at_index(index)))
            .collect(),
        other => validate_record(other).map(|record| vec![record]),
    }
}

/// Reads records from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Vec<Annotation>, AnnofactoryError> {
    let value: Value =
        serde_json::from_str(json).map_err(|source| AnnofactoryError::RecordJsonParse {
            path: "<memory>".into(),
            source,
        })?;
    Ok(records_from_value(&value)?)
}

/// Reads records from JSON bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Vec<Annotation>, AnnofactoryError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| AnnofactoryError::RecordJsonParse {
            path: "<memory>".into(),
            source,
        })?;
    Ok(records_from_value(&value)?)
}

/// Writes records to a pretty-printed JSON string.
pub fn to_json_string(records: &[Annotation]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
