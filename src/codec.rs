//! # Persistence Codec
//!
//! Converts between in-memory media records and a versioned JSON document,
//! and moves that document to and from disk.
//!
//! ## Document shape
//!
//! ```text
//! {
//!   "metadata": {
//!     "version": "1.0",
//!     "createdAt": "2024-03-01T10:15:00+00:00",
//!     "count": 2,                // informational, not re-checked on load
//!     "generator": "mediateca 0.3.1"
//!   },
//!   "media": [
//!     { "type": "Libro", "id": "...", "title": "...", ... },
//!     { "type": "Film",  "id": "...", "title": "...", ... }
//!   ]
//! }
//! ```
//!
//! ## Decode policy
//!
//! Structural problems (root not an object, `metadata` or `media` missing,
//! `media` not an array) abort the whole decode with
//! [`CatalogError::MalformedDocument`]. Individually broken records inside
//! `media` (unknown type tag, missing fields, failed validation, duplicate
//! id) are skipped with a warning and decode continues with the rest.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::model::Media;

/// Version tag written into every document.
pub const FORMAT_VERSION: &str = "1.0";

/// JSON document codec with a retained diagnostic for the last failure.
#[derive(Debug, Default)]
pub struct JsonCodec {
    last_error: Option<String>,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostic from the most recent failed operation, if any.
    /// Cleared by the next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Build the versioned document for a set of records. Never fails.
    pub fn encode(&self, items: &[Media]) -> Value {
        json!({
            "metadata": {
                "version": FORMAT_VERSION,
                "createdAt": Utc::now().to_rfc3339(),
                "count": items.len(),
                "generator": concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
            },
            "media": items.iter().map(Media::to_document).collect::<Vec<_>>(),
        })
    }

    /// Validate the document structure, then rebuild the records.
    pub fn decode(&mut self, document: &Value) -> Result<Vec<Media>> {
        let result = decode_document(document);
        self.track(result)
    }

    /// Write a document as pretty-printed UTF-8 JSON, creating intermediate
    /// directories as needed.
    pub fn write_to_file(&mut self, document: &Value, path: &Path) -> Result<()> {
        let result = write_document(document, path);
        self.track(result)
    }

    /// Read and parse a document from disk.
    pub fn read_from_file(&mut self, path: &Path) -> Result<Value> {
        let result = read_document(path);
        self.track(result)
    }

    /// `encode` + `write_to_file`.
    pub fn save(&mut self, items: &[Media], path: &Path) -> Result<()> {
        let document = self.encode(items);
        self.write_to_file(&document, path)?;
        log::debug!("Saved {} media records to {}", items.len(), path.display());
        Ok(())
    }

    /// `read_from_file` + `decode`.
    pub fn load(&mut self, path: &Path) -> Result<Vec<Media>> {
        let document = self.read_from_file(path)?;
        let items = self.decode(&document)?;
        log::debug!("Loaded {} media records from {}", items.len(), path.display());
        Ok(items)
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }
}

fn malformed(message: &str) -> CatalogError {
    CatalogError::MalformedDocument(message.to_string())
}

fn decode_document(document: &Value) -> Result<Vec<Media>> {
    let root = document
        .as_object()
        .ok_or_else(|| malformed("root is not an object"))?;

    let metadata = root
        .get("metadata")
        .ok_or_else(|| malformed("missing `metadata`"))?;
    let media = root
        .get("media")
        .ok_or_else(|| malformed("missing `media`"))?;

    let metadata = metadata
        .as_object()
        .ok_or_else(|| malformed("`metadata` is not an object"))?;
    if !metadata.contains_key("version") {
        return Err(malformed("`metadata` is missing `version`"));
    }
    if !metadata.contains_key("createdAt") {
        return Err(malformed("`metadata` is missing `createdAt`"));
    }

    let records = media
        .as_array()
        .ok_or_else(|| malformed("`media` is not an array"))?;

    // `metadata.count` is informational only and deliberately not compared
    // against the array length.
    let mut items: Vec<Media> = Vec::with_capacity(records.len());
    let mut seen: Vec<Uuid> = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match Media::from_document(record) {
            Ok(media) => {
                if seen.contains(&media.id) {
                    log::warn!("Skipping media record {}: duplicate id {}", position, media.id);
                    continue;
                }
                seen.push(media.id);
                items.push(media);
            }
            Err(e) => log::warn!("Skipping media record {}: {}", position, e),
        }
    }
    Ok(items)
}

fn write_document(document: &Value, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(document)?;
    fs::write(path, text)?;
    Ok(())
}

fn read_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    let document = serde_json::from_str(&text)?;
    Ok(document)
}
