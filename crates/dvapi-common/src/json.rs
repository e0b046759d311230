//! JSON file helpers
//!
//! Metadata for dataverses and datasets lives in JSON files on disk. These
//! helpers read them and move between JSON text and `serde_json::Value`
//! without touching the content, so a file can be handed to the API as-is.

use crate::error::{DvError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a whole file into a string
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DvError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read file");

    Ok(content)
}

/// Read a JSON file into a `Value`
pub fn read_file_json(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = read_file(path)?;

    serde_json::from_str(&content).map_err(|source| DvError::InvalidJson {
        path: path.display().to_string(),
        source,
    })
}

/// Parse JSON text into a `Value`
pub fn json_to_value(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a `Value` to compact JSON text
pub fn value_to_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serialize a `Value` to indented JSON text
pub fn value_to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
