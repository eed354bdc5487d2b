//! Catalog entities: media items, subscribers, and the tier that partitions them.
//!
//! Each entity comes with a creation draft (caller-supplied fields, tier still
//! raw) and a patch (optional fields merged over an existing record).

mod media_item;
mod subscriber;
mod tier;

pub use media_item::{MediaItem, MediaItemPatch, NewMediaItem};
pub use subscriber::{NewSubscriber, Subscriber, SubscriberPatch};
pub use tier::{InvalidTier, Tier};

/// Replace `slot` only when a non-empty value is supplied.
fn merge_field(slot: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value;
    }
}

/// Parse an optional raw tier, treating empty as absent.
fn parse_patch_tier(value: Option<&str>) -> Result<Option<Tier>, InvalidTier> {
    match value.filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}
