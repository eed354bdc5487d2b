use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_field, parse_patch_tier, Tier};
use crate::repository::{Record, RepositoryError};

/// A media item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tier: Tier,
    pub image_url: String,
    pub trailer_url: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    pub title: String,
    pub description: String,
    pub tier: String,
    pub image_url: String,
    pub trailer_url: String,
}

/// Partial update for a media item. Absent or empty fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tier: Option<String>,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl MediaItemPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn trailer_url(mut self, trailer_url: impl Into<String>) -> Self {
        self.trailer_url = Some(trailer_url.into());
        self
    }
}

impl Record for MediaItem {
    const COLLECTION: &'static str = "media_items";
    type Draft = NewMediaItem;
    type Patch = MediaItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(
        id: String,
        created_at: DateTime<Utc>,
        draft: NewMediaItem,
    ) -> Result<Self, RepositoryError> {
        let tier = draft.tier.parse::<Tier>()?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            tier,
            image_url: draft.image_url,
            trailer_url: draft.trailer_url,
            created_at,
        })
    }

    fn merge(&mut self, patch: MediaItemPatch) -> Result<(), RepositoryError> {
        // Validate before touching anything so a bad tier leaves the record intact.
        if let Some(tier) = parse_patch_tier(patch.tier.as_deref())? {
            self.tier = tier;
        }
        merge_field(&mut self.title, patch.title);
        merge_field(&mut self.description, patch.description);
        merge_field(&mut self.image_url, patch.image_url);
        merge_field(&mut self.trailer_url, patch.trailer_url);
        Ok(())
    }
}
