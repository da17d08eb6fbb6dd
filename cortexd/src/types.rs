//! Common type definitions.
//!
//! ID aliases for the entities the control plane touches. Users are
//! identified by the UUID the identity provider assigns; catalog rows use
//! the serial keys from Postgres.

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type ProviderId = i32;
pub type ModelId = i64;
pub type OrganizationId = i64;

/// Abbreviate a UUID to its first 8 characters for more readable logs
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
