//! Composable predicates over media records.
//!
//! A filter is a boolean predicate plus a human readable description.
//! Leaf filters ([`TypeFilter`], [`YearRangeFilter`], [`FieldFilter`]) test
//! one aspect of a record; [`AndFilter`] and [`NotFilter`] combine them.
//! Filters are stateless, so cloning is a value copy; `Box<dyn MediaFilter>`
//! is itself `Clone` through `clone_box`.

use crate::model::Media;

pub trait MediaFilter {
    fn matches(&self, media: &Media) -> bool;

    /// Human readable description of the condition, for UI display.
    fn describe(&self) -> String;

    fn clone_box(&self) -> Box<dyn MediaFilter>;
}

impl Clone for Box<dyn MediaFilter> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Matches records whose type tag equals the given name, case-insensitively.
#[derive(Debug, Clone)]
pub struct TypeFilter {
    type_name: String,
}

impl TypeFilter {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl MediaFilter for TypeFilter {
    fn matches(&self, media: &Media) -> bool {
        media.type_name().eq_ignore_ascii_case(self.type_name.trim())
    }

    fn describe(&self) -> String {
        format!("tipo = {}", self.type_name)
    }

    fn clone_box(&self) -> Box<dyn MediaFilter> {
        Box::new(self.clone())
    }
}

/// Matches records whose year lies in `min..=max`.
#[derive(Debug, Clone)]
pub struct YearRangeFilter {
    min: i32,
    max: i32,
}

impl YearRangeFilter {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

impl MediaFilter for YearRangeFilter {
    fn matches(&self, media: &Media) -> bool {
        media.year >= self.min && media.year <= self.max
    }

    fn describe(&self) -> String {
        format!("anno tra {} e {}", self.min, self.max)
    }

    fn clone_box(&self) -> Box<dyn MediaFilter> {
        Box::new(self.clone())
    }
}

/// Delegates to [`Media::matches_criterion`].
#[derive(Debug, Clone)]
pub struct FieldFilter {
    criterion: String,
    value: String,
}

impl FieldFilter {
    pub fn new(criterion: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            criterion: criterion.into(),
            value: value.into(),
        }
    }
}

impl MediaFilter for FieldFilter {
    fn matches(&self, media: &Media) -> bool {
        media.matches_criterion(&self.criterion, &self.value)
    }

    fn describe(&self) -> String {
        format!("{} contiene \"{}\"", self.criterion, self.value)
    }

    fn clone_box(&self) -> Box<dyn MediaFilter> {
        Box::new(self.clone())
    }
}

/// Ordered conjunction of sub-filters.
///
/// An empty conjunction matches every record. Evaluation short-circuits on
/// the first failing sub-filter; order never changes the result.
#[derive(Clone, Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn MediaFilter>>,
}

impl AndFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl MediaFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push(&mut self, filter: Box<dyn MediaFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl MediaFilter for AndFilter {
    fn matches(&self, media: &Media) -> bool {
        self.filters.iter().all(|f| f.matches(media))
    }

    fn describe(&self) -> String {
        if self.filters.is_empty() {
            "nessun criterio".to_string()
        } else {
            self.filters
                .iter()
                .map(|f| f.describe())
                .collect::<Vec<_>>()
                .join(" e ")
        }
    }

    fn clone_box(&self) -> Box<dyn MediaFilter> {
        Box::new(self.clone())
    }
}

/// Negation of a concrete filter.
#[derive(Clone)]
pub struct NotFilter {
    inner: Box<dyn MediaFilter>,
}

impl NotFilter {
    pub fn new(inner: impl MediaFilter + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn from_box(inner: Box<dyn MediaFilter>) -> Self {
        Self { inner }
    }
}

impl MediaFilter for NotFilter {
    fn matches(&self, media: &Media) -> bool {
        !self.inner.matches(media)
    }

    fn describe(&self) -> String {
        format!("non ({})", self.inner.describe())
    }

    fn clone_box(&self) -> Box<dyn MediaFilter> {
        Box::new(self.clone())
    }
}

/// Convenience constructors for the common filters.
pub mod factory {
    use super::{FieldFilter, MediaFilter, TypeFilter, YearRangeFilter};

    pub fn by_type(type_name: &str) -> Box<dyn MediaFilter> {
        Box::new(TypeFilter::new(type_name))
    }

    pub fn by_year_range(min: i32, max: i32) -> Box<dyn MediaFilter> {
        Box::new(YearRangeFilter::new(min, max))
    }

    pub fn by_author(value: &str) -> Box<dyn MediaFilter> {
        Box::new(FieldFilter::new("autore", value))
    }

    pub fn by_director(value: &str) -> Box<dyn MediaFilter> {
        Box::new(FieldFilter::new("regista", value))
    }

    pub fn by_journal(value: &str) -> Box<dyn MediaFilter> {
        Box::new(FieldFilter::new("rivista", value))
    }
}
