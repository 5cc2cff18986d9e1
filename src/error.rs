use std::path::PathBuf;

use thiserror::Error;

use crate::types::Kind;

/// Errors returned by the load operations and by [`bind`](crate::bind).
#[derive(Debug, Error)]
pub enum BindError {
    #[error("Failed to read {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    DocumentParseFailure {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to capture the current record before loading {path}: {source}")]
    SnapshotFailure {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot bind '{key}': field '{field}' is not settable")]
    Unsettable { key: String, field: &'static str },

    #[error("Invalid value for '{key}' (field '{field}'): '{value}' is not a valid {kind}")]
    InvalidFormat {
        key: String,
        field: &'static str,
        value: String,
        kind: Kind,
    },

    #[error("Invalid value for '{key}' (field '{field}'): '{value}' is out of range for {kind}")]
    OutOfRange {
        key: String,
        field: &'static str,
        value: String,
        kind: Kind,
    },

    #[error("Cannot bind '{key}': field '{field}' has type {kind}, which cannot be set from text")]
    UnsupportedKind {
        key: String,
        field: &'static str,
        kind: Kind,
    },
}

/// Failure of a single coercion, before the binder knows which key caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("'{value}' is not a valid {kind}")]
    InvalidFormat { value: String, kind: Kind },

    #[error("'{value}' is out of range for {kind}")]
    OutOfRange { value: String, kind: Kind },

    #[error("no coercion rule for {kind}")]
    UnsupportedKind { kind: Kind },

    #[error("destination is not settable")]
    Unsettable,
}

impl CoerceError {
    /// Attach the input key and the target field name.
    pub fn into_bind_error(self, key: &str, field: &'static str) -> BindError {
        let key = key.to_string();
        match self {
            CoerceError::InvalidFormat { value, kind } => BindError::InvalidFormat {
                key,
                field,
                value,
                kind,
            },
            CoerceError::OutOfRange { value, kind } => BindError::OutOfRange {
                key,
                field,
                value,
                kind,
            },
            CoerceError::UnsupportedKind { kind } => {
                BindError::UnsupportedKind { key, field, kind }
            }
            CoerceError::Unsettable => BindError::Unsettable { key, field },
        }
    }
}
