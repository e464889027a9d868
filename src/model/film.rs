//! Film variant payload.

use serde_json::{json, Map, Value};

use super::enums::{Genre, Rating};
use super::{optional_str, require_enum, require_str, require_str_list, require_u32};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    pub director: String,
    pub cast: Vec<String>,
    pub runtime_minutes: u32,
    pub genre: Genre,
    pub rating: Rating,
    pub production_company: Option<String>,
}

impl Film {
    pub fn new(director: impl Into<String>, cast: Vec<String>, runtime_minutes: u32) -> Self {
        Self {
            director: director.into(),
            cast,
            runtime_minutes,
            genre: Genre::default(),
            rating: Rating::G,
            production_company: None,
        }
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_production_company(mut self, company: impl Into<String>) -> Self {
        self.production_company = Some(company.into());
        self
    }

    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        if self.director.trim().is_empty() {
            errors.push("director must not be empty".to_string());
        }
        if self.cast.is_empty() {
            errors.push("cast must list at least one name".to_string());
        } else if self.cast.iter().any(|name| name.trim().is_empty()) {
            errors.push("cast names must not be empty".to_string());
        }
        if self.runtime_minutes == 0 {
            errors.push("runtime must be positive".to_string());
        }
    }

    pub(crate) fn write_fields(&self, record: &mut Map<String, Value>) {
        record.insert("director".to_string(), json!(self.director));
        record.insert("cast".to_string(), json!(self.cast));
        record.insert("runtimeMinutes".to_string(), json!(self.runtime_minutes));
        record.insert("genre".to_string(), json!(self.genre.index()));
        record.insert("rating".to_string(), json!(self.rating.index()));
        record.insert(
            "productionCompany".to_string(),
            json!(self.production_company),
        );
    }

    pub(crate) fn read_fields(record: &Value) -> Result<Self> {
        Ok(Self {
            director: require_str(record, "director")?,
            cast: require_str_list(record, "cast")?,
            runtime_minutes: require_u32(record, "runtimeMinutes")?,
            genre: require_enum(record, "genre", Genre::from_index)?,
            rating: require_enum(record, "rating", Rating::from_index)?,
            production_company: optional_str(record, "productionCompany"),
        })
    }

    pub(crate) fn push_display(&self, lines: &mut Vec<String>) {
        lines.push(format!("Regista: {}", self.director));
        lines.push(format!("Cast: {}", self.cast.join(", ")));
        lines.push(format!("Durata: {} min", self.runtime_minutes));
        lines.push(format!("Genere: {}", self.genre.label()));
        lines.push(format!("Classificazione: {}", self.rating.label()));
        if let Some(company) = &self.production_company {
            lines.push(format!("Produzione: {}", company));
        }
    }

    pub(crate) fn push_search_text(&self, parts: &mut Vec<String>) {
        parts.push(self.director.clone());
        parts.extend(self.cast.iter().cloned());
        parts.push(self.genre.label().to_string());
        parts.push(self.rating.label().to_string());
        if let Some(company) = &self.production_company {
            parts.push(company.clone());
        }
    }
}
