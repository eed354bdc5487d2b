//! Catalog - the operation façade over the repositories and the topic bus.
//!
//! Queries return owned copies. Mutations return a fixed human-readable
//! message rather than an error. Creating a record publishes it; updating or
//! deleting one does not.
//!
//! ## Example
//!
//! ```
//! use media_catalog::catalog::{messages, Catalog, Channel};
//! use media_catalog::model::NewMediaItem;
//!
//! let catalog = Catalog::new();
//! let mut premium = catalog.subscribe(Channel::ItemCreatedPremium);
//!
//! let result = catalog.create_item(NewMediaItem {
//!     title: "Blade Runner".into(),
//!     tier: "PREMIUM".into(),
//!     ..Default::default()
//! });
//! assert_eq!(result, messages::ITEM_CREATED);
//!
//! let delivered = premium.try_recv().unwrap();
//! assert_eq!(delivered.as_item().unwrap().title, "Blade Runner");
//! ```

mod channel;
pub mod messages;
mod sample;

use serde::Serialize;
use tracing::{debug, info};

use crate::bus::TopicBus;
use crate::model::{
    MediaItem, MediaItemPatch, NewMediaItem, NewSubscriber, Subscriber, SubscriberPatch, Tier,
};
use crate::repository::{InMemoryRepository, RepositoryError};

pub use channel::{topics, CatalogEvent, Channel, ChannelStream, Notification, UnknownChannel};

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoginOutcome {
    Authenticated(Subscriber),
    Rejected(&'static str),
}

impl LoginOutcome {
    pub fn subscriber(&self) -> Option<&Subscriber> {
        match self {
            LoginOutcome::Authenticated(subscriber) => Some(subscriber),
            LoginOutcome::Rejected(_) => None,
        }
    }
}

/// The catalog façade.
///
/// Clone-friendly: clones share the same repositories and bus.
#[derive(Clone)]
pub struct Catalog {
    items: InMemoryRepository<MediaItem>,
    subscribers: InMemoryRepository<Subscriber>,
    bus: TopicBus<CatalogEvent>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with its own bus.
    pub fn new() -> Self {
        Self::from_parts(
            InMemoryRepository::new(),
            InMemoryRepository::new(),
            TopicBus::new(),
        )
    }

    /// Compose a catalog from existing parts.
    pub fn from_parts(
        items: InMemoryRepository<MediaItem>,
        subscribers: InMemoryRepository<Subscriber>,
        bus: TopicBus<CatalogEvent>,
    ) -> Self {
        Self {
            items,
            subscribers,
            bus,
        }
    }

    /// Create a catalog preloaded with the sample items and subscribers.
    pub fn with_sample_data() -> Self {
        Self::from_parts(
            InMemoryRepository::from_records(sample::items()),
            InMemoryRepository::from_records(sample::subscribers()),
            TopicBus::new(),
        )
    }

    pub fn items(&self) -> &InMemoryRepository<MediaItem> {
        &self.items
    }

    pub fn subscribers(&self) -> &InMemoryRepository<Subscriber> {
        &self.subscribers
    }

    pub fn bus(&self) -> &TopicBus<CatalogEvent> {
        &self.bus
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Items of the given tier, in insertion order. An unknown tier yields no items.
    pub fn items_by_tier(&self, tier: &str) -> Vec<MediaItem> {
        match tier.parse::<Tier>() {
            Ok(tier) => self.items.find(|item| item.tier == tier),
            Err(err) => {
                debug!(%err, "items_by_tier with unknown tier");
                Vec::new()
            }
        }
    }

    pub fn all_subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.all()
    }

    pub fn item_by_id(&self, id: &str) -> Option<MediaItem> {
        self.items.get(id).ok()
    }

    pub fn subscriber_by_id(&self, id: &str) -> Option<Subscriber> {
        self.subscribers.get(id).ok()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store a new item and publish it to the generic and tier-specific channels.
    pub fn create_item(&self, draft: NewMediaItem) -> &'static str {
        let item = match self.items.create(draft) {
            Ok(item) => item,
            Err(err) => return item_rejection(&err),
        };

        info!(id = %item.id, tier = %item.tier, "item created");
        self.publish(CatalogEvent::item_created_for_tier(item.clone()));
        self.publish(CatalogEvent::ItemCreated(item));
        messages::ITEM_CREATED
    }

    /// Store a new subscriber and publish it to the subscriber channel.
    pub fn create_subscriber(&self, draft: NewSubscriber) -> &'static str {
        let subscriber = match self.subscribers.create(draft) {
            Ok(subscriber) => subscriber,
            Err(err) => return subscriber_rejection(&err),
        };

        info!(id = %subscriber.id, tier = %subscriber.tier, "subscriber created");
        self.publish(CatalogEvent::SubscriberCreated(subscriber));
        messages::SUBSCRIBER_CREATED
    }

    pub fn update_item(&self, id: &str, patch: MediaItemPatch) -> &'static str {
        match self.items.update(id, patch) {
            Ok(()) => messages::ITEM_UPDATED,
            Err(err) => item_rejection(&err),
        }
    }

    pub fn update_subscriber(&self, id: &str, patch: SubscriberPatch) -> &'static str {
        match self.subscribers.update(id, patch) {
            Ok(()) => messages::SUBSCRIBER_UPDATED,
            Err(err) => subscriber_rejection(&err),
        }
    }

    pub fn delete_item(&self, id: &str) -> &'static str {
        match self.items.delete(id) {
            Ok(()) => messages::ITEM_DELETED,
            Err(err) => item_rejection(&err),
        }
    }

    pub fn delete_subscriber(&self, id: &str) -> &'static str {
        match self.subscribers.delete(id) {
            Ok(()) => messages::SUBSCRIBER_DELETED,
            Err(err) => subscriber_rejection(&err),
        }
    }

    /// Find the subscriber whose email and password both match exactly.
    ///
    /// Passwords are compared as stored plaintext.
    pub fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self
            .subscribers
            .find_one(|subscriber| subscriber.matches_credentials(email, password))
        {
            Some(subscriber) => LoginOutcome::Authenticated(subscriber),
            None => {
                debug!("login rejected");
                LoginOutcome::Rejected(messages::INVALID_CREDENTIALS)
            }
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Open a stream of records created after this call on the given channel.
    pub fn subscribe(&self, channel: Channel) -> ChannelStream {
        ChannelStream::new(channel, self.bus.subscribe([channel.topic()]))
    }

    fn publish(&self, event: CatalogEvent) {
        let topic = event.topic();
        self.bus.publish(topic, event);
    }
}

fn item_rejection(err: &RepositoryError) -> &'static str {
    debug!(%err, "item mutation rejected");
    match err {
        RepositoryError::InvalidTier(_) => messages::INVALID_TIER,
        RepositoryError::NotFound { .. } => messages::ITEM_NOT_FOUND,
    }
}

fn subscriber_rejection(err: &RepositoryError) -> &'static str {
    debug!(%err, "subscriber mutation rejected");
    match err {
        RepositoryError::InvalidTier(_) => messages::INVALID_TIER,
        RepositoryError::NotFound { .. } => messages::SUBSCRIBER_NOT_FOUND,
    }
}
