use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_field, parse_patch_tier, Tier};
use crate::repository::{Record, RepositoryError};

/// A catalog subscriber.
///
/// The password is stored and compared as given; there is no hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriber {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tier: String,
}

/// Partial update for a subscriber. Absent or empty fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub tier: Option<String>,
}

impl SubscriberPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }
}

impl Subscriber {
    /// Exact email and password equality.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl Record for Subscriber {
    const COLLECTION: &'static str = "subscribers";
    type Draft = NewSubscriber;
    type Patch = SubscriberPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(
        id: String,
        created_at: DateTime<Utc>,
        draft: NewSubscriber,
    ) -> Result<Self, RepositoryError> {
        let tier = draft.tier.parse::<Tier>()?;
        Ok(Self {
            id,
            name: draft.name,
            email: draft.email,
            password: draft.password,
            tier,
            created_at,
        })
    }

    fn merge(&mut self, patch: SubscriberPatch) -> Result<(), RepositoryError> {
        if let Some(tier) = parse_patch_tier(patch.tier.as_deref())? {
            self.tier = tier;
        }
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.email, patch.email);
        merge_field(&mut self.password, patch.password);
        Ok(())
    }
}
