//! # Collection
//!
//! [`MediaCollection`] is the authoritative in-memory set of records. It is
//! the only gate through which records enter or leave the catalog, and it
//! enforces the two admission rules on every mutation: the record must be
//! valid, and its id must be unique within the collection.
//!
//! Insertion order is preserved for iteration but carries no meaning.
//!
//! ## Notifications
//!
//! Subscribers registered with [`MediaCollection::subscribe`] receive a
//! [`CollectionEvent`] synchronously, on the caller's thread, exactly once
//! per successful mutating operation, after the mutation is committed.
//! Failed operations fire nothing. Delivery follows registration order.
//!
//! ## Persistence
//!
//! `save_to` and `load_from` bridge to [`crate::codec::JsonCodec`].
//! A successful load replaces the whole set atomically (one `Cleared`, one
//! `Loaded`); a failed load leaves the current set untouched.

use std::path::Path;

use uuid::Uuid;

use crate::codec::JsonCodec;
use crate::error::{CatalogError, Result};
use crate::filter::MediaFilter;
use crate::model::Media;

/// Change notification fired after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvent {
    Added(Uuid),
    Removed(Uuid),
    Updated(Uuid),
    Cleared,
    Loaded(usize),
}

type Subscriber = Box<dyn Fn(&CollectionEvent)>;

#[derive(Default)]
pub struct MediaCollection {
    items: Vec<Media>,
    subscribers: Vec<Subscriber>,
}

impl MediaCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synchronous observer for change notifications.
    pub fn subscribe(&mut self, subscriber: impl Fn(&CollectionEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&self, event: CollectionEvent) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Admit a record. Fails with [`CatalogError::InvalidMedia`] if the
    /// record does not validate, with [`CatalogError::DuplicateId`] if its
    /// id is already taken.
    pub fn add(&mut self, media: Media) -> Result<()> {
        let errors = media.validation_errors();
        if !errors.is_empty() {
            return Err(CatalogError::InvalidMedia(errors.join("; ")));
        }
        if self.items.iter().any(|m| m.id == media.id) {
            return Err(CatalogError::DuplicateId(media.id));
        }
        let id = media.id;
        self.items.push(media);
        self.notify(CollectionEvent::Added(id));
        Ok(())
    }

    /// Remove by id. Returns whether a record was removed; fires only then.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|m| m.id != *id);
        if self.items.len() < before {
            self.notify(CollectionEvent::Removed(*id));
            true
        } else {
            false
        }
    }

    /// Whole-record replacement keyed by id.
    ///
    /// The target id is stamped onto the replacement before it is stored,
    /// so the stored identity cannot diverge from the lookup key.
    pub fn update(&mut self, id: &Uuid, mut media: Media) -> Result<()> {
        media.id = *id;
        let errors = media.validation_errors();
        if !errors.is_empty() {
            return Err(CatalogError::InvalidMedia(errors.join("; ")));
        }
        let slot = self
            .items
            .iter_mut()
            .find(|m| m.id == *id)
            .ok_or(CatalogError::NotFound(*id))?;
        *slot = media;
        self.notify(CollectionEvent::Updated(*id));
        Ok(())
    }

    pub fn find(&self, id: &Uuid) -> Option<&Media> {
        self.items.iter().find(|m| m.id == *id)
    }

    /// Read-only view in insertion order.
    pub fn get_all(&self) -> &[Media] {
        &self.items
    }

    pub fn get_by_type(&self, type_name: &str) -> Vec<&Media> {
        self.items
            .iter()
            .filter(|m| m.type_name().eq_ignore_ascii_case(type_name.trim()))
            .collect()
    }

    pub fn count_by_type(&self, type_name: &str) -> usize {
        self.get_by_type(type_name).len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Full-text search over [`Media::searchable_text`].
    /// Empty text returns every record, in `get_all` order.
    pub fn search(&self, text: &str) -> Vec<&Media> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|m| m.searchable_text().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn apply_filter(&self, filter: &dyn MediaFilter) -> Vec<&Media> {
        self.items.iter().filter(|m| filter.matches(m)).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.notify(CollectionEvent::Cleared);
    }

    /// Scan for duplicate ids and invalid records. Diagnostics only; the
    /// admission rules above keep a well-used collection clean.
    pub fn validate_integrity(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (position, media) in self.items.iter().enumerate() {
            if self.items[..position].iter().any(|m| m.id == media.id) {
                violations.push(format!("duplicate id {}", media.id));
            }
            for error in media.validation_errors() {
                violations.push(format!("{}: {}", media.id, error));
            }
        }
        violations
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut codec = JsonCodec::new();
        codec.save(&self.items, path)
    }

    /// Replace the whole set with the records persisted at `path`.
    ///
    /// Fires `Cleared` then `Loaded(count)` on success; on any failure the
    /// current set is left untouched and nothing fires.
    pub fn load_from(&mut self, path: &Path) -> Result<usize> {
        let mut codec = JsonCodec::new();
        let items = codec.load(path)?;
        let count = items.len();
        self.items.clear();
        self.notify(CollectionEvent::Cleared);
        self.items = items;
        self.notify(CollectionEvent::Loaded(count));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AndFilter, TypeFilter};
    use crate::model::{Book, Film, Media};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn book() -> Media {
        Media::book("Se questo è un uomo", 1947, Book::new("Primo Levi", 179))
    }

    fn film() -> Media {
        Media::film(
            "Roma città aperta",
            1945,
            Film::new("Roberto Rossellini", vec!["Anna Magnani".to_string()], 103),
        )
    }

    #[test]
    fn test_add_and_find() {
        let mut collection = MediaCollection::new();
        let media = book();
        let id = media.id;
        collection.add(media).unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.find(&id).unwrap().title, "Se questo è un uomo");
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut collection = MediaCollection::new();
        let result = collection.add(Media::book("", 2020, Book::new("X", 10)));
        assert!(matches!(result, Err(CatalogError::InvalidMedia(_))));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut collection = MediaCollection::new();
        let media = book();
        let mut twin = film();
        twin.id = media.id;

        collection.add(media).unwrap();
        let result = collection.add(twin);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut collection = MediaCollection::new();
        let media = book();
        let id = media.id;
        collection.add(media).unwrap();

        assert!(collection.remove(&id));
        assert!(collection.is_empty());
        assert!(!collection.remove(&id));
    }

    #[test]
    fn test_update_replaces_and_stamps_id() {
        let mut collection = MediaCollection::new();
        let media = book();
        let id = media.id;
        collection.add(media).unwrap();

        // Replacement arrives with its own fresh id; the slot keeps `id`.
        let replacement = Media::book("La tregua", 1963, Book::new("Primo Levi", 254));
        collection.update(&id, replacement).unwrap();

        assert_eq!(collection.len(), 1);
        let stored = collection.find(&id).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, "La tregua");
    }

    #[test]
    fn test_update_missing_id() {
        let mut collection = MediaCollection::new();
        let result = collection.update(&Uuid::new_v4(), book());
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_update_rejects_invalid() {
        let mut collection = MediaCollection::new();
        let media = book();
        let id = media.id;
        collection.add(media).unwrap();

        let invalid = Media::book("", 2020, Book::new("X", 10));
        assert!(collection.update(&id, invalid).is_err());
        assert_eq!(collection.find(&id).unwrap().title, "Se questo è un uomo");
    }

    #[test]
    fn test_get_by_type_and_counts() {
        let mut collection = MediaCollection::new();
        collection.add(book()).unwrap();
        collection.add(film()).unwrap();

        assert_eq!(collection.get_by_type("Libro").len(), 1);
        assert_eq!(collection.get_by_type("libro").len(), 1);
        assert_eq!(collection.count_by_type("Film"), 1);
        assert_eq!(collection.count_by_type("Articolo"), 0);
    }

    #[test]
    fn test_search_empty_returns_all_in_order() {
        let mut collection = MediaCollection::new();
        collection.add(book()).unwrap();
        collection.add(film()).unwrap();

        let results = collection.search("");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, collection.get_all()[0].title);
        assert_eq!(results[1].title, collection.get_all()[1].title);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut collection = MediaCollection::new();
        collection.add(book()).unwrap();
        collection.add(film()).unwrap();

        let results = collection.search("PRIMO levi");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Se questo è un uomo");
        assert!(collection.search("zzz").is_empty());
    }

    #[test]
    fn test_apply_filter() {
        let mut collection = MediaCollection::new();
        collection.add(book()).unwrap();
        collection.add(film()).unwrap();

        let films = collection.apply_filter(&TypeFilter::new("Film"));
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].title, "Roma città aperta");

        // Vacuous conjunction selects the whole set.
        let everything = collection.apply_filter(&AndFilter::new());
        assert_eq!(everything.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut collection = MediaCollection::new();
        collection.add(book()).unwrap();
        collection.clear();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_validate_integrity_reports_duplicates() {
        let mut collection = MediaCollection::new();
        let media = book();
        let mut twin = film();
        twin.id = media.id;

        // Bypass `add` to fabricate a corrupted state.
        collection.items.push(media);
        collection.items.push(twin);

        let violations = collection.validate_integrity();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("duplicate id"));
    }

    #[test]
    fn test_validate_integrity_clean() {
        let mut collection = MediaCollection::new();
        collection.add(book()).unwrap();
        assert!(collection.validate_integrity().is_empty());
    }

    #[test]
    fn test_notifications_fire_once_per_mutation() {
        let events: Rc<RefCell<Vec<CollectionEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut collection = MediaCollection::new();
        collection.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let media = book();
        let id = media.id;
        collection.add(media).unwrap();
        collection.update(&id, film()).unwrap();
        collection.remove(&id);
        collection.clear();

        let seen = events.borrow();
        assert_eq!(
            *seen,
            vec![
                CollectionEvent::Added(id),
                CollectionEvent::Updated(id),
                CollectionEvent::Removed(id),
                CollectionEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_failed_operations_fire_nothing() {
        let count: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut collection = MediaCollection::new();
        collection.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(collection.add(Media::book("", 2020, Book::new("X", 1))).is_err());
        assert!(!collection.remove(&Uuid::new_v4()));
        assert!(collection.update(&Uuid::new_v4(), book()).is_err());

        assert_eq!(*count.borrow(), 0);
    }
}
