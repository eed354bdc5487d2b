//! Subscription tier shared by media items and subscribers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of subscription tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Basic,
    Standard,
    Premium,
}

/// A tier value outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tier: {0:?}")]
pub struct InvalidTier(pub String);

impl Tier {
    /// Every tier, in ascending order.
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Standard, Tier::Premium];

    /// Wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "BASIC",
            Tier::Standard => "STANDARD",
            Tier::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Exact, case-sensitive match on the wire name.
impl FromStr for Tier {
    type Err = InvalidTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| InvalidTier(s.to_string()))
    }
}
