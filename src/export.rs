//! Flat CSV export: one row per record, for spreadsheets and quick sharing.
//! A lossy view, not a persistence format; reloading goes through
//! [`crate::codec`] instead.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::collection::MediaCollection;
use crate::error::Result;

/// One exported row.
#[derive(Debug, Clone, Serialize)]
pub struct FlatRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub year: i32,
    pub description: String,
    pub info: String,
}

/// Flatten a collection in iteration order.
pub fn flat_rows(collection: &MediaCollection) -> Vec<FlatRow> {
    collection
        .get_all()
        .iter()
        .map(|media| FlatRow {
            kind: media.type_name().to_string(),
            title: media.title.clone(),
            year: media.year,
            description: media.description.clone(),
            info: media.display_info(),
        })
        .collect()
}

/// Write the flattened collection as CSV. Returns the number of rows.
pub fn export_csv(collection: &MediaCollection, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let rows = flat_rows(collection);
    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}
