//! Fixed human-readable results returned by catalog mutations.

pub const INVALID_TIER: &str = "Subscription tier must be BASIC, STANDARD or PREMIUM";

pub const ITEM_CREATED: &str = "Item created successfully";
pub const ITEM_UPDATED: &str = "Item updated successfully";
pub const ITEM_DELETED: &str = "Item deleted successfully";
pub const ITEM_NOT_FOUND: &str = "Item does not exist";

pub const SUBSCRIBER_CREATED: &str = "Subscriber created successfully";
pub const SUBSCRIBER_UPDATED: &str = "Subscriber updated successfully";
pub const SUBSCRIBER_DELETED: &str = "Subscriber deleted successfully";
pub const SUBSCRIBER_NOT_FOUND: &str = "Subscriber does not exist";

/// Same text whether the email is unknown or the password is wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
