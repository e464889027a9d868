use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid media: {0}")]
    InvalidMedia(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(Uuid),

    #[error("Media not found: {0}")]
    NotFound(Uuid),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedVariant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
