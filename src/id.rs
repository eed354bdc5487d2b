//! Identifier generation for catalog records.

use uuid::Uuid;

/// Length of every generated identifier.
pub const ID_LEN: usize = 24;

/// Generate a fresh opaque identifier.
///
/// Draws from a random v4 UUID and keeps the first 24 hex characters of its
/// hyphen-free form. Calls are independent of each other.
pub fn generate() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}
