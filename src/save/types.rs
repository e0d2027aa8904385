//! Save data types
//!
//! Value, entry, format and error types shared by the save system.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::directories::SaveDirectory;

/// A stored value
///
/// Values keep their type in memory. Text formats (JSON, XML) write the
/// display form and read back `String`, which the typed getters parse.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub enum SaveValue {
    Int(i32),
    Float(f32),
    String(String),
}

impl SaveValue {
    /// Name of the variant, used in conversion errors
    pub fn kind(&self) -> &'static str {
        match self {
            SaveValue::Int(_) => "int",
            SaveValue::Float(_) => "float",
            SaveValue::String(_) => "string",
        }
    }
}

impl fmt::Display for SaveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveValue::Int(v) => write!(f, "{}", v),
            SaveValue::Float(v) => write!(f, "{}", v),
            SaveValue::String(v) => f.write_str(v),
        }
    }
}

impl From<i32> for SaveValue {
    fn from(value: i32) -> Self {
        SaveValue::Int(value)
    }
}

impl From<f32> for SaveValue {
    fn from(value: f32) -> Self {
        SaveValue::Float(value)
    }
}

impl From<String> for SaveValue {
    fn from(value: String) -> Self {
        SaveValue::String(value)
    }
}

impl From<&str> for SaveValue {
    fn from(value: &str) -> Self {
        SaveValue::String(value.to_string())
    }
}

/// One key and its value
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct KeyValuePair {
    pub key: String,
    pub value: SaveValue,
}

/// Serialization format for save files
///
/// The format also decides the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Binary,
    Json,
    Xml,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Binary, DataType::Json, DataType::Xml];

    /// File extension including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            DataType::Binary => ".bytes",
            DataType::Json => ".json",
            DataType::Xml => ".xml",
        }
    }

    /// Reverse lookup from an extension without the dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|data_type| &data_type.extension()[1..] == ext)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Binary => "binary",
            DataType::Json => "json",
            DataType::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// Error types for save/load operations
///
/// A missing file on load and a blocked overwrite on save are not errors;
/// the manager logs those and reports them through its return values.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Binary decode error: {0}")]
    Binary(#[from] bitcode::Error),

    /// Stored value can't be read as the requested type
    #[error("Invalid stored value for key '{key}': expected {expected}, found {found:?}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("No save data registered under '{0}'")]
    NotRegistered(String),

    /// File name would leave the configured save directory
    #[error("Invalid save file name: {0}")]
    InvalidFileName(String),

    #[error("Save directory unavailable: {0:?}")]
    DirectoryUnavailable(SaveDirectory),

    #[error("Config error in {}: {}", .path.display(), .message)]
    Config { path: PathBuf, message: String },
}
