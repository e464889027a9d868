//! Book variant payload.

use serde_json::{json, Map, Value};

use super::enums::Genre;
use super::{is_valid_isbn, optional_str, require_enum, require_str, require_u32};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub author: String,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub isbn: Option<String>,
    pub genre: Genre,
}

impl Book {
    pub fn new(author: impl Into<String>, page_count: u32) -> Self {
        Self {
            author: author.into(),
            publisher: None,
            page_count,
            isbn: None,
            genre: Genre::default(),
        }
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub(crate) fn collect_errors(&self, errors: &mut Vec<String>) {
        if self.author.trim().is_empty() {
            errors.push("author must not be empty".to_string());
        }
        if self.page_count == 0 {
            errors.push("page count must be positive".to_string());
        }
        if let Some(isbn) = &self.isbn {
            if !isbn.trim().is_empty() && !is_valid_isbn(isbn) {
                errors.push(format!("`{}` is not an ISBN-10 or ISBN-13", isbn));
            }
        }
    }

    pub(crate) fn write_fields(&self, record: &mut Map<String, Value>) {
        record.insert("author".to_string(), json!(self.author));
        record.insert("publisher".to_string(), json!(self.publisher));
        record.insert("pageCount".to_string(), json!(self.page_count));
        record.insert("isbn".to_string(), json!(self.isbn));
        record.insert("genre".to_string(), json!(self.genre.index()));
    }

    pub(crate) fn read_fields(record: &Value) -> Result<Self> {
        Ok(Self {
            author: require_str(record, "author")?,
            publisher: optional_str(record, "publisher"),
            page_count: require_u32(record, "pageCount")?,
            isbn: optional_str(record, "isbn"),
            genre: require_enum(record, "genre", Genre::from_index)?,
        })
    }

    pub(crate) fn push_display(&self, lines: &mut Vec<String>) {
        lines.push(format!("Autore: {}", self.author));
        if let Some(publisher) = &self.publisher {
            lines.push(format!("Editore: {}", publisher));
        }
        lines.push(format!("Pagine: {}", self.page_count));
        if let Some(isbn) = &self.isbn {
            lines.push(format!("ISBN: {}", isbn));
        }
        lines.push(format!("Genere: {}", self.genre.label()));
    }

    pub(crate) fn push_search_text(&self, parts: &mut Vec<String>) {
        parts.push(self.author.clone());
        if let Some(publisher) = &self.publisher {
            parts.push(publisher.clone());
        }
        if let Some(isbn) = &self.isbn {
            parts.push(isbn.clone());
        }
        parts.push(self.genre.label().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_book_is_valid() {
        let book = Book::new("Umberto Eco", 503);
        let mut errors = Vec::new();
        book.collect_errors(&mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_author_is_invalid() {
        let book = Book::new("   ", 100);
        let mut errors = Vec::new();
        book.collect_errors(&mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("author"));
    }

    #[test]
    fn test_zero_pages_is_invalid() {
        let book = Book::new("X", 0);
        let mut errors = Vec::new();
        book.collect_errors(&mut errors);
        assert!(errors.iter().any(|e| e.contains("page count")));
    }

    #[test]
    fn test_isbn_shapes() {
        let mut errors = Vec::new();
        Book::new("X", 1).with_isbn("88-452-0705-6").collect_errors(&mut errors);
        assert!(errors.is_empty());

        Book::new("X", 1)
            .with_isbn("978-88-452-0705-8")
            .collect_errors(&mut errors);
        assert!(errors.is_empty());

        Book::new("X", 1).with_isbn("not-an-isbn").collect_errors(&mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_field_roundtrip() {
        let book = Book::new("Italo Calvino", 224)
            .with_publisher("Einaudi")
            .with_isbn("8806173405")
            .with_genre(Genre::Novel);

        let mut record = Map::new();
        book.write_fields(&mut record);
        let restored = Book::read_fields(&Value::Object(record)).unwrap();
        assert_eq!(restored, book);
    }

    #[test]
    fn test_read_fields_rejects_missing_author() {
        let record = json!({ "pageCount": 10, "genre": 0 });
        assert!(Book::read_fields(&record).is_err());
    }
}
