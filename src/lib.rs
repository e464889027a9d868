//! # Mediateca
//!
//! A UI-agnostic catalog engine for heterogeneous media records: books,
//! films and journal articles, owned by a single user and persisted to a
//! versioned JSON document. This is a library that a CLI or GUI client sits
//! on top of, not an application with some library code attached.
//!
//! ## The layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Client (CLI, GUI, web...)  -- not part of this crate   │
//! │  Calls collection operations, reacts to change events   │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Collection (collection.rs)                             │
//! │  Identity-enforcing set of records; search, filters,    │
//! │  change notifications, persistence bridge               │
//! └─────────────────────────────────────────────────────────┘
//!              │                            │
//!              ▼                            ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │  Model (model/)          │  │  Codec (codec.rs)        │
//! │  Media record variants,  │  │  Versioned JSON document │
//! │  validation, search text │  │  encode/decode, file I/O │
//! └──────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! The filter engine ([`filter`]) is a side-car to the collection: clients
//! build predicate trees and hand them to
//! [`collection::MediaCollection::apply_filter`].
//!
//! ## Key properties
//!
//! - A record that fails validation never enters a collection.
//! - Ids are unique within a collection; add rejects duplicates.
//! - Encode then decode reproduces every record field-for-field, id
//!   included.
//! - Every successful mutation fires exactly one synchronous notification;
//!   failed operations fire none.
//!
//! Everything is single-threaded and synchronous. Callers that introduce
//! threads must serialize access themselves.
//!
//! ## Module overview
//!
//! - [`model`]: the record variants and their validation
//! - [`collection`]: the owning container and its notifications
//! - [`filter`]: composable query predicates
//! - [`codec`]: the persisted document format and file I/O
//! - [`export`]: lossy one-row-per-record CSV export
//! - [`error`]: error types

pub mod codec;
pub mod collection;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
