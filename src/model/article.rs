//! Article variant payload.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use super::enums::{Category, JournalType};
use super::{is_valid_doi, optional_str, require_enum, require_str, require_str_list};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub authors: Vec<String>,
    pub journal: String,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub category: Category,
    pub journal_type: JournalType,
    pub publication_date: NaiveDate,
    pub doi: Option<String>,
}

impl Article {
    pub fn new(
        authors: Vec<String>,
        journal: impl Into<String>,
        journal_type: JournalType,
        publication_date: NaiveDate,
    ) -> Self {
        Self {
            authors,
            journal: journal.into(),
            volume: None,
            issue: None,
            pages: None,
            category: Category::default(),
            journal_type,
            publication_date,
            doi: None,
        }
    }

    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        if self.authors.is_empty() {
            errors.push("authors must list at least one name".to_string());
        } else if self.authors.iter().any(|name| name.trim().is_empty()) {
            errors.push("author names must not be empty".to_string());
        }
        if self.journal.trim().is_empty() {
            errors.push("journal must not be empty".to_string());
        }
        if let Some(doi) = &self.doi {
            if !doi.trim().is_empty() && !is_valid_doi(doi) {
                errors.push(format!("`{}` is not a valid DOI", doi));
            }
        }
    }

    pub(crate) fn write_fields(&self, record: &mut Map<String, Value>) {
        record.insert("authors".to_string(), json!(self.authors));
        record.insert("journal".to_string(), json!(self.journal));
        record.insert("volume".to_string(), json!(self.volume));
        record.insert("issue".to_string(), json!(self.issue));
        record.insert("pages".to_string(), json!(self.pages));
        record.insert("category".to_string(), json!(self.category.index()));
        record.insert("journalType".to_string(), json!(self.journal_type.index()));
        record.insert(
            "publicationDate".to_string(),
            json!(self.publication_date.to_string()),
        );
        record.insert("doi".to_string(), json!(self.doi));
    }

    pub(crate) fn read_fields(record: &Value) -> Result<Self> {
        let date_raw = require_str(record, "publicationDate")?;
        let publication_date = date_raw.parse::<NaiveDate>().map_err(|_| {
            CatalogError::InvalidMedia(format!("`{}` is not a valid publication date", date_raw))
        })?;

        Ok(Self {
            authors: require_str_list(record, "authors")?,
            journal: require_str(record, "journal")?,
            volume: optional_str(record, "volume"),
            issue: optional_str(record, "issue"),
            pages: optional_str(record, "pages"),
            category: require_enum(record, "category", Category::from_index)?,
            journal_type: require_enum(record, "journalType", JournalType::from_index)?,
            publication_date,
            doi: optional_str(record, "doi"),
        })
    }

    pub(crate) fn push_display(&self, lines: &mut Vec<String>) {
        lines.push(format!("Autori: {}", self.authors.join(", ")));
        let mut journal_line = format!("Rivista: {}", self.journal);
        if let Some(volume) = &self.volume {
            journal_line.push_str(&format!(", vol. {}", volume));
        }
        if let Some(issue) = &self.issue {
            journal_line.push_str(&format!(", n. {}", issue));
        }
        if let Some(pages) = &self.pages {
            journal_line.push_str(&format!(", pp. {}", pages));
        }
        lines.push(journal_line);
        lines.push(format!("Categoria: {}", self.category.label()));
        lines.push(format!("Tipo: {}", self.journal_type.label()));
        lines.push(format!("Pubblicato: {}", self.publication_date));
        if let Some(doi) = &self.doi {
            lines.push(format!("DOI: {}", doi));
        }
    }

    pub(crate) fn push_search_text(&self, parts: &mut Vec<String>) {
        parts.extend(self.authors.iter().cloned());
        parts.push(self.journal.clone());
        for field in [&self.volume, &self.issue, &self.pages, &self.doi] {
            if let Some(value) = field {
                parts.push(value.clone());
            }
        }
        parts.push(self.category.label().to_string());
        parts.push(self.journal_type.label().to_string());
        parts.push(self.publication_date.to_string());
    }
}
