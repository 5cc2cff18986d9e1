//! JSON document loading.
//!
//! Documents do not go through the key/value binder. The whole file is
//! decoded with `serde_json` into the record's shape instead, so field names
//! and renames follow the record's serde attributes rather than its
//! `impl_record!` aliases.
//!
//! Decoding happens *into* the existing record: the record is serialized, the
//! document is deep-merged on top of it, and the result is deserialized back.
//! Keys the document leaves out keep whatever value the record already had,
//! non-finite floats included, which is what lets a document sit underneath
//! environment variables and arguments as the lowest layer. A document that
//! is just `null` leaves the record alone.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BindError;
use crate::merge::deep_merge;
use crate::snapshot::{restore, snapshot};

/// Read the file at `path` without interpreting it.
pub fn read_document(path: impl AsRef<Path>) -> Result<Vec<u8>, BindError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| BindError::ReadFailure {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the JSON document at `path` and decode it into `record`.
///
/// With `record` set to `None` the file is read and nothing else happens,
/// which still surfaces a missing or unreadable file.
pub fn load_from_document<R>(
    record: Option<&mut R>,
    path: impl AsRef<Path>,
) -> Result<(), BindError>
where
    R: Serialize + DeserializeOwned,
{
    let path = path.as_ref();
    let bytes = read_document(path)?;
    let Some(record) = record else {
        return Ok(());
    };

    let parse_failure = |source: serde_json::Error| BindError::DocumentParseFailure {
        path: path.to_path_buf(),
        source,
    };

    let document: Value = serde_json::from_slice(&bytes).map_err(parse_failure)?;
    if document.is_null() {
        tracing::debug!(path = %path.display(), "document is null, record left unchanged");
        return Ok(());
    }

    let current = snapshot(&*record).map_err(|source| BindError::SnapshotFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let merged = match (current, document) {
        (Value::Object(base), Value::Object(overlay)) => Value::Object(deep_merge(base, overlay)),
        (_, document) => document,
    };
    *record = restore(merged).map_err(parse_failure)?;

    tracing::debug!(path = %path.display(), "loaded document");
    Ok(())
}
