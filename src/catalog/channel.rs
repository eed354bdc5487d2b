//! Subscription channels, their bus topics, and per-topic payloads.

use std::pin::Pin;
use std::str::FromStr;
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_stream::Stream;

use crate::bus::TopicStream;
use crate::model::{MediaItem, Subscriber, Tier};

/// Bus topic names, one per channel.
pub mod topics {
    pub const ITEM_CREATED: &str = "ITEM_CREATED";
    pub const BASIC_ITEM_CREATED: &str = "BASIC_ITEM_CREATED";
    pub const STANDARD_ITEM_CREATED: &str = "STANDARD_ITEM_CREATED";
    pub const PREMIUM_ITEM_CREATED: &str = "PREMIUM_ITEM_CREATED";
    pub const SUBSCRIBER_CREATED: &str = "SUBSCRIBER_CREATED";
}

/// Logical subscription channels a caller can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    ItemCreated,
    ItemCreatedBasic,
    ItemCreatedStandard,
    ItemCreatedPremium,
    SubscriberCreated,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::ItemCreated,
        Channel::ItemCreatedBasic,
        Channel::ItemCreatedStandard,
        Channel::ItemCreatedPremium,
        Channel::SubscriberCreated,
    ];

    /// Name the channel is addressed by from outside.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::ItemCreated => "itemCreated",
            Channel::ItemCreatedBasic => "itemCreatedBasic",
            Channel::ItemCreatedStandard => "itemCreatedStandard",
            Channel::ItemCreatedPremium => "itemCreatedPremium",
            Channel::SubscriberCreated => "subscriberCreated",
        }
    }

    /// Bus topic backing the channel.
    pub fn topic(&self) -> &'static str {
        match self {
            Channel::ItemCreated => topics::ITEM_CREATED,
            Channel::ItemCreatedBasic => topics::BASIC_ITEM_CREATED,
            Channel::ItemCreatedStandard => topics::STANDARD_ITEM_CREATED,
            Channel::ItemCreatedPremium => topics::PREMIUM_ITEM_CREATED,
            Channel::SubscriberCreated => topics::SUBSCRIBER_CREATED,
        }
    }

    /// Tier-specific item channel.
    pub fn for_tier(tier: Tier) -> Channel {
        match tier {
            Tier::Basic => Channel::ItemCreatedBasic,
            Tier::Standard => Channel::ItemCreatedStandard,
            Tier::Premium => Channel::ItemCreatedPremium,
        }
    }

    /// Unwrap a bus payload into this channel's result shape.
    ///
    /// Returns `None` for a payload that belongs to another channel.
    pub fn resolve(&self, event: CatalogEvent) -> Option<Notification> {
        match (self, event) {
            (Channel::ItemCreated, CatalogEvent::ItemCreated(item))
            | (Channel::ItemCreatedBasic, CatalogEvent::ItemCreatedBasic(item))
            | (Channel::ItemCreatedStandard, CatalogEvent::ItemCreatedStandard(item))
            | (Channel::ItemCreatedPremium, CatalogEvent::ItemCreatedPremium(item)) => {
                Some(Notification::Item(item))
            }
            (Channel::SubscriberCreated, CatalogEvent::SubscriberCreated(subscriber)) => {
                Some(Notification::Subscriber(subscriber))
            }
            _ => None,
        }
    }
}

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.name() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

/// Payload published on the bus, keyed by the channel it feeds.
///
/// Serializes as `{"itemCreatedPremium": {...}}` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogEvent {
    ItemCreated(MediaItem),
    ItemCreatedBasic(MediaItem),
    ItemCreatedStandard(MediaItem),
    ItemCreatedPremium(MediaItem),
    SubscriberCreated(Subscriber),
}

impl CatalogEvent {
    /// Tier-specific creation payload for an item.
    pub fn item_created_for_tier(item: MediaItem) -> Self {
        match item.tier {
            Tier::Basic => CatalogEvent::ItemCreatedBasic(item),
            Tier::Standard => CatalogEvent::ItemCreatedStandard(item),
            Tier::Premium => CatalogEvent::ItemCreatedPremium(item),
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            CatalogEvent::ItemCreated(_) => Channel::ItemCreated,
            CatalogEvent::ItemCreatedBasic(_) => Channel::ItemCreatedBasic,
            CatalogEvent::ItemCreatedStandard(_) => Channel::ItemCreatedStandard,
            CatalogEvent::ItemCreatedPremium(_) => Channel::ItemCreatedPremium,
            CatalogEvent::SubscriberCreated(_) => Channel::SubscriberCreated,
        }
    }

    pub fn topic(&self) -> &'static str {
        self.channel().topic()
    }
}

/// One delivery on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Notification {
    Item(MediaItem),
    Subscriber(Subscriber),
}

impl Notification {
    pub fn as_item(&self) -> Option<&MediaItem> {
        match self {
            Notification::Item(item) => Some(item),
            Notification::Subscriber(_) => None,
        }
    }

    pub fn as_subscriber(&self) -> Option<&Subscriber> {
        match self {
            Notification::Subscriber(subscriber) => Some(subscriber),
            Notification::Item(_) => None,
        }
    }
}

/// An open channel subscription, resolving bus payloads to notifications.
pub struct ChannelStream {
    channel: Channel,
    inner: TopicStream<CatalogEvent>,
}

impl ChannelStream {
    pub(crate) fn new(channel: Channel, inner: TopicStream<CatalogEvent>) -> Self {
        Self { channel, inner }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Wait for the next notification. `None` once the bus is torn down.
    pub async fn recv(&mut self) -> Option<Notification> {
        loop {
            let event = self.inner.recv().await?;
            if let Some(notification) = self.channel.resolve(event) {
                return Some(notification);
            }
        }
    }

    /// Take the next notification if one is already waiting.
    pub fn try_recv(&mut self) -> Option<Notification> {
        while let Some(event) = self.inner.try_recv() {
            if let Some(notification) = self.channel.resolve(event) {
                return Some(notification);
            }
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Stop delivery and release the bus registration.
    pub fn close(self) {
        self.inner.close()
    }
}

impl Stream for ChannelStream {
    type Item = Notification;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Notification>> {
        let channel = self.channel;
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(event)) => {
                    if let Some(notification) = channel.resolve(event) {
                        return Poll::Ready(Some(notification));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
