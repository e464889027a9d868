//! # Domain Model: Media Records
//!
//! A [`Media`] is one catalog record. The common fields (id, title, year,
//! description) live on the record itself; everything type-specific lives in
//! [`MediaDetails`], a closed union over [`Book`], [`Film`] and [`Article`].
//! Every operation that depends on the variant (validation, document
//! conversion, display, criterion matching) matches exhaustively, so adding
//! a variant fails to compile until every site handles it.
//!
//! ## Identity
//!
//! Ids are v4 UUIDs, assigned once at construction and preserved through
//! edits and persistence round trips. Uniqueness is a property of the
//! owning collection, not of the record.
//!
//! ## Validation
//!
//! `validation_errors` returns every violation at once; `is_valid` is the
//! empty check over it. A record that fails validation is never admitted to
//! a collection and never reconstructed from a document.
//!
//! ## Document records
//!
//! `to_document` / `from_document` convert a record to and from one entry of
//! the persisted `media` array (see [`crate::codec`]). The `type` field
//! carries the stable tag ("Libro", "Film", "Articolo"), enums are stored as
//! declaration-order indices, dates as `YYYY-MM-DD`.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::{CatalogError, Result};

pub mod article;
pub mod book;
pub mod enums;
pub mod film;

pub use article::Article;
pub use book::Book;
pub use enums::{Category, Genre, JournalType, Rating};
pub use film::Film;

/// Earliest year a record may carry.
pub const MIN_YEAR: i32 = 1000;

static ISBN10_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9}[\dXx]$").unwrap());
static ISBN13_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{13}$").unwrap());
static DOI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^10\.\d{4,9}/\S+$").unwrap());

/// Latest year a record may carry (ten years of slack for announced works).
pub fn max_year() -> i32 {
    Utc::now().year() + 10
}

/// ISBN-10 or ISBN-13 shape, hyphens and spaces ignored.
pub(crate) fn is_valid_isbn(s: &str) -> bool {
    let compact: String = s.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
    ISBN10_RE.is_match(&compact) || ISBN13_RE.is_match(&compact)
}

/// `10.NNNN/suffix` shape.
pub(crate) fn is_valid_doi(s: &str) -> bool {
    DOI_RE.is_match(s.trim())
}

/// Variant payload of a media record.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaDetails {
    Book(Book),
    Film(Film),
    Article(Article),
}

/// One catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub description: String,
    pub details: MediaDetails,
}

impl Media {
    /// Construct a fresh record with a newly assigned id.
    pub fn new(
        title: impl Into<String>,
        year: i32,
        description: impl Into<String>,
        details: MediaDetails,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            year,
            description: description.into(),
            details,
        }
    }

    pub fn book(title: impl Into<String>, year: i32, book: Book) -> Self {
        Self::new(title, year, "", MediaDetails::Book(book))
    }

    pub fn film(title: impl Into<String>, year: i32, film: Film) -> Self {
        Self::new(title, year, "", MediaDetails::Film(film))
    }

    pub fn article(title: impl Into<String>, year: i32, article: Article) -> Self {
        Self::new(title, year, "", MediaDetails::Article(article))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Stable tag, also the serialization discriminator.
    pub fn type_name(&self) -> &'static str {
        match &self.details {
            MediaDetails::Book(_) => "Libro",
            MediaDetails::Film(_) => "Film",
            MediaDetails::Article(_) => "Articolo",
        }
    }

    /// All violations at once; empty means the record is admissible.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("title must not be empty".to_string());
        }
        let max = max_year();
        if self.year < MIN_YEAR || self.year > max {
            errors.push(format!(
                "year {} outside the range {}..={}",
                self.year, MIN_YEAR, max
            ));
        }
        match &self.details {
            MediaDetails::Book(book) => book.collect_errors(&mut errors),
            MediaDetails::Film(film) => film.collect_errors(&mut errors),
            MediaDetails::Article(article) => article.collect_errors(&mut errors),
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Case-insensitive substring lookup keyed by criterion name.
    ///
    /// Known criteria: `autore`, `regista`, `attori`, `genere`, `editore`,
    /// `rivista`, `categoria`, `isbn`, `doi`. Unknown names and empty
    /// values never match.
    pub fn matches_criterion(&self, name: &str, value: &str) -> bool {
        let needle = value.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        match name.trim().to_lowercase().as_str() {
            "autore" => match &self.details {
                MediaDetails::Book(book) => contains_ci(&book.author, &needle),
                MediaDetails::Article(article) => {
                    article.authors.iter().any(|a| contains_ci(a, &needle))
                }
                MediaDetails::Film(_) => false,
            },
            "regista" => match &self.details {
                MediaDetails::Film(film) => contains_ci(&film.director, &needle),
                _ => false,
            },
            "attori" => match &self.details {
                MediaDetails::Film(film) => film.cast.iter().any(|a| contains_ci(a, &needle)),
                _ => false,
            },
            "genere" => match &self.details {
                MediaDetails::Book(book) => contains_ci(book.genre.label(), &needle),
                MediaDetails::Film(film) => contains_ci(film.genre.label(), &needle),
                MediaDetails::Article(_) => false,
            },
            "editore" => match &self.details {
                MediaDetails::Book(book) => book
                    .publisher
                    .as_deref()
                    .is_some_and(|p| contains_ci(p, &needle)),
                _ => false,
            },
            "rivista" => match &self.details {
                MediaDetails::Article(article) => contains_ci(&article.journal, &needle),
                _ => false,
            },
            "categoria" => match &self.details {
                MediaDetails::Article(article) => contains_ci(article.category.label(), &needle),
                _ => false,
            },
            "isbn" => match &self.details {
                MediaDetails::Book(book) => {
                    book.isbn.as_deref().is_some_and(|i| contains_ci(i, &needle))
                }
                _ => false,
            },
            "doi" => match &self.details {
                MediaDetails::Article(article) => {
                    article.doi.as_deref().is_some_and(|d| contains_ci(d, &needle))
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Concatenation of every textual field, used for full-text search.
    pub fn searchable_text(&self) -> String {
        let mut parts = vec![
            self.type_name().to_string(),
            self.title.clone(),
            self.year.to_string(),
        ];
        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }
        match &self.details {
            MediaDetails::Book(book) => book.push_search_text(&mut parts),
            MediaDetails::Film(film) => film.push_search_text(&mut parts),
            MediaDetails::Article(article) => article.push_search_text(&mut parts),
        }
        parts.join(" ")
    }

    /// Multi-line human readable summary.
    pub fn display_info(&self) -> String {
        let mut lines = vec![format!("{}: {} ({})", self.type_name(), self.title, self.year)];
        match &self.details {
            MediaDetails::Book(book) => book.push_display(&mut lines),
            MediaDetails::Film(film) => film.push_display(&mut lines),
            MediaDetails::Article(article) => article.push_display(&mut lines),
        }
        if !self.description.trim().is_empty() {
            lines.push(format!("Descrizione: {}", self.description));
        }
        lines.join("\n")
    }

    /// One entry of the persisted `media` array.
    pub fn to_document(&self) -> Value {
        let mut record = Map::new();
        record.insert("type".to_string(), json!(self.type_name()));
        record.insert("id".to_string(), json!(self.id.to_string()));
        record.insert("title".to_string(), json!(self.title));
        record.insert("year".to_string(), json!(self.year));
        record.insert("description".to_string(), json!(self.description));
        match &self.details {
            MediaDetails::Book(book) => book.write_fields(&mut record),
            MediaDetails::Film(film) => film.write_fields(&mut record),
            MediaDetails::Article(article) => article.write_fields(&mut record),
        }
        Value::Object(record)
    }

    /// Rebuild a record from one entry of the `media` array.
    ///
    /// The id is taken verbatim from the document. Fails on an unknown
    /// `type` tag, on missing or mistyped required fields, and on records
    /// that do not pass validation.
    pub fn from_document(record: &Value) -> Result<Self> {
        if !record.is_object() {
            return Err(CatalogError::InvalidMedia(
                "record is not an object".to_string(),
            ));
        }
        let type_tag = require_str(record, "type")?;
        let details = match type_tag.as_str() {
            "Libro" => MediaDetails::Book(Book::read_fields(record)?),
            "Film" => MediaDetails::Film(Film::read_fields(record)?),
            "Articolo" => MediaDetails::Article(Article::read_fields(record)?),
            other => return Err(CatalogError::UnsupportedVariant(other.to_string())),
        };

        let id_raw = require_str(record, "id")?;
        let id = Uuid::parse_str(&id_raw)
            .map_err(|_| CatalogError::InvalidMedia(format!("`{}` is not a valid id", id_raw)))?;

        let media = Self {
            id,
            title: require_str(record, "title")?,
            year: require_i32(record, "year")?,
            description: optional_str(record, "description").unwrap_or_default(),
            details,
        };

        let errors = media.validation_errors();
        if errors.is_empty() {
            Ok(media)
        } else {
            Err(CatalogError::InvalidMedia(errors.join("; ")))
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub(crate) fn require_str(record: &Value, key: &str) -> Result<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CatalogError::InvalidMedia(format!("missing string field `{}`", key)))
}

pub(crate) fn optional_str(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn require_u32(record: &Value, key: &str) -> Result<u32> {
    record
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| CatalogError::InvalidMedia(format!("missing numeric field `{}`", key)))
}

pub(crate) fn require_i32(record: &Value, key: &str) -> Result<i32> {
    record
        .get(key)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| CatalogError::InvalidMedia(format!("missing numeric field `{}`", key)))
}

pub(crate) fn require_str_list(record: &Value, key: &str) -> Result<Vec<String>> {
    let array = record
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogError::InvalidMedia(format!("missing list field `{}`", key)))?;
    array
        .iter()
        .map(|entry| {
            entry.as_str().map(str::to_string).ok_or_else(|| {
                CatalogError::InvalidMedia(format!("non-string entry in `{}`", key))
            })
        })
        .collect()
}

pub(crate) fn require_enum<T>(
    record: &Value,
    key: &str,
    from_index: fn(usize) -> Option<T>,
) -> Result<T> {
    let index = record
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| CatalogError::InvalidMedia(format!("missing numeric field `{}`", key)))?;
    from_index(index as usize).ok_or_else(|| {
        CatalogError::InvalidMedia(format!("field `{}` index {} out of range", key, index))
    })
}
