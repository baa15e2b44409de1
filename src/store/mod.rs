//! Storage boundary.
//!
//! # Module Organization
//!
//! - `engine` - Generic collection contract, paging primitives, `StoreError`
//! - `documents` - Per-collection document shapes
//! - `collections` - Per-collection derived-query traits
//! - `memory` - In-memory engine (tests, development)
//! - `postgres` - PostgreSQL/JSONB engine

mod collections;
mod documents;
mod engine;
mod memory;
mod postgres;

pub use collections::{
    ApiCollection, ApplicationCollection, NotificationCollection, RatingCollection,
    SubscriptionCollection, TeamCollection, UserCollection,
};
pub use documents::{
    ApiDocument, ApplicationDocument, NotificationDocument, OwnerDocument, RatingDocument,
    SubscriptionDocument, TeamDocument, UserDocument,
};
pub use engine::{
    Document, DocumentPage, DocumentStore, PageQuery, Sort, SortKey, SortOrder, StoreError,
};
pub use memory::{MemoryCollection, MemoryStore};
pub use postgres::{PgCollection, PgStore};
