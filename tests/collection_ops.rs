use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use tempfile::TempDir;

use mediateca::collection::{CollectionEvent, MediaCollection};
use mediateca::error::CatalogError;
use mediateca::export;
use mediateca::filter::{factory, AndFilter, MediaFilter, NotFilter, TypeFilter, YearRangeFilter};
use mediateca::model::{Article, Book, Film, JournalType, Media};

fn one_of_each() -> MediaCollection {
    let mut collection = MediaCollection::new();
    collection
        .add(Media::book("Gomorra", 2006, Book::new("Roberto Saviano", 331)))
        .unwrap();
    collection
        .add(Media::film(
            "La grande bellezza",
            2013,
            Film::new("Paolo Sorrentino", vec!["Toni Servillo".to_string()], 141),
        ))
        .unwrap();
    collection
        .add(Media::article(
            "Complex networks: structure and dynamics",
            2006,
            Article::new(
                vec!["S. Boccaletti".to_string()],
                "Physics Reports",
                JournalType::Academic,
                NaiveDate::from_ymd_opt(2006, 2, 1).unwrap(),
            ),
        ))
        .unwrap();
    collection
}

#[test]
fn test_adding_a_valid_book_grows_the_collection() {
    let mut collection = MediaCollection::new();
    collection
        .add(Media::book("A", 2020, Book::new("X", 100)))
        .unwrap();
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_adding_a_colliding_id_fails_and_size_is_unchanged() {
    let mut collection = MediaCollection::new();
    let first = Media::book("A", 2020, Book::new("X", 100));
    let mut second = Media::book("B", 2021, Book::new("Y", 200));
    second.id = first.id;

    collection.add(first).unwrap();
    let result = collection.add(second);

    assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_removing_a_nonexistent_id_returns_false_and_fires_nothing() {
    let fired: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);

    let mut collection = one_of_each();
    collection.subscribe(move |_| *sink.borrow_mut() += 1);

    assert!(!collection.remove(&uuid::Uuid::new_v4()));
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn test_search_with_empty_text_returns_everything_in_order() {
    let collection = one_of_each();
    let all: Vec<&str> = collection.get_all().iter().map(|m| m.title.as_str()).collect();
    let found: Vec<&str> = collection.search("").iter().map(|m| m.title.as_str()).collect();
    assert_eq!(found, all);
}

#[test]
fn test_search_finds_variant_fields() {
    let collection = one_of_each();
    assert_eq!(collection.search("sorrentino").len(), 1);
    assert_eq!(collection.search("PHYSICS reports").len(), 1);
    assert_eq!(collection.search("2006").len(), 2);
}

#[test]
fn test_empty_composite_matches_every_record() {
    let collection = one_of_each();
    let empty = AndFilter::new();
    assert_eq!(collection.apply_filter(&empty).len(), collection.len());
}

#[test]
fn test_type_filter_isolates_the_film() {
    let collection = one_of_each();
    let films = collection.apply_filter(&TypeFilter::new("Film"));
    assert_eq!(films.len(), 1);
    assert_eq!(films[0].title, "La grande bellezza");
}

#[test]
fn test_composed_filters_narrow_the_set() {
    let collection = one_of_each();

    let recent_non_films = AndFilter::new()
        .with(YearRangeFilter::new(2000, 2020))
        .with(NotFilter::new(TypeFilter::new("Film")));
    let found = collection.apply_filter(&recent_non_films);
    assert_eq!(found.len(), 2);

    let by_journal = factory::by_journal("physics");
    assert_eq!(collection.apply_filter(by_journal.as_ref()).len(), 1);
}

#[test]
fn test_cloned_filter_tree_keeps_matching() {
    let collection = one_of_each();
    let tree: Box<dyn MediaFilter> = Box::new(
        AndFilter::new()
            .with(TypeFilter::new("Articolo"))
            .with(YearRangeFilter::new(2000, 2010)),
    );
    let copy = tree.clone();
    assert_eq!(
        collection.apply_filter(copy.as_ref()).len(),
        collection.apply_filter(tree.as_ref()).len()
    );
}

#[test]
fn test_load_fires_cleared_then_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    one_of_each().save_to(&path).unwrap();

    let events: Rc<RefCell<Vec<CollectionEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);

    let mut collection = MediaCollection::new();
    collection.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    collection.load_from(&path).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![CollectionEvent::Cleared, CollectionEvent::Loaded(3)]
    );
}

#[test]
fn test_failed_load_fires_nothing() {
    let dir = TempDir::new().unwrap();
    let fired: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);

    let mut collection = one_of_each();
    collection.subscribe(move |_| *sink.borrow_mut() += 1);

    assert!(collection.load_from(&dir.path().join("absent.json")).is_err());
    assert_eq!(*fired.borrow(), 0);
    assert_eq!(collection.len(), 3);
}

#[test]
fn test_csv_export_writes_one_row_per_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flat.csv");

    let collection = one_of_each();
    let rows = export::export_csv(&collection, &path).unwrap();
    assert_eq!(rows, 3);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("type,title,year,description,info"));
    assert!(text.contains("Gomorra"));
    assert!(text.contains("Articolo"));
}

#[test]
fn test_update_keeps_the_lookup_key() {
    let mut collection = one_of_each();
    let id = collection.get_all()[1].id;

    let replacement = Media::film(
        "Youth",
        2015,
        Film::new("Paolo Sorrentino", vec!["Michael Caine".to_string()], 124),
    );
    collection.update(&id, replacement).unwrap();

    assert_eq!(collection.find(&id).unwrap().title, "Youth");
    assert_eq!(collection.len(), 3);
}
