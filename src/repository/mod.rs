//! Repositories - authoritative in-memory collections of catalog records.
//!
//! A repository owns an insertion-ordered collection and hands out owned
//! clones only, so nothing a caller does with a returned record can reach
//! back into stored state.
//!
//! ## Example
//!
//! ```
//! use media_catalog::model::{MediaItem, NewMediaItem};
//! use media_catalog::repository::InMemoryRepository;
//!
//! let items = InMemoryRepository::<MediaItem>::new();
//! let created = items
//!     .create(NewMediaItem {
//!         title: "Alien".into(),
//!         tier: "PREMIUM".into(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let loaded = items.get(&created.id).unwrap();
//! assert_eq!(loaded, created);
//! ```

mod error;
mod in_memory;

use chrono::{DateTime, Utc};

pub use error::RepositoryError;
pub use in_memory::InMemoryRepository;

/// A record kind that can live in a repository.
pub trait Record: Clone + Send + Sync + 'static {
    /// Collection name, used in errors and logs.
    const COLLECTION: &'static str;

    /// Caller-supplied fields for creation.
    type Draft;

    /// Partial update merged over an existing record.
    type Patch;

    /// Returns the unique identifier of this record.
    fn id(&self) -> &str;

    /// Build a record from a draft. The repository supplies id and timestamp.
    fn create(id: String, created_at: DateTime<Utc>, draft: Self::Draft)
        -> Result<Self, RepositoryError>;

    /// Merge a patch over this record. Identifier and creation time never change.
    /// On error the record must be left as it was.
    fn merge(&mut self, patch: Self::Patch) -> Result<(), RepositoryError>;
}
