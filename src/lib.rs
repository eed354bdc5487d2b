//! In-memory media catalog with tier-partitioned creation notifications.
//!
//! - [`repository`] owns the record collections and hands out owned copies.
//! - [`bus`] fans payloads out to any number of topic streams.
//! - [`catalog`] composes both: mutations, queries, login, subscriptions.
//! - [`service`] exposes the catalog as named operations (and over HTTP with
//!   the `http` feature).

pub mod bus;
pub mod catalog;
pub mod config;
pub mod id;
pub mod model;
pub mod repository;
pub mod service;

pub use bus::{TopicBus, TopicStream};
pub use catalog::{Catalog, Channel, ChannelStream, LoginOutcome, Notification};
pub use config::{ConfigError, ServerConfig};
pub use model::{MediaItem, Subscriber, Tier};
pub use repository::{InMemoryRepository, Record, RepositoryError};
