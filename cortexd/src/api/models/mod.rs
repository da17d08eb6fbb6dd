//! API request/response models.
//!
//! These are the wire types for the admin surface, kept separate from the
//! database models in [`crate::db::models`]. Endpoints whose bodies need
//! 400-level validation (rather than axum's default 422 rejection) parse a
//! raw `serde_json::Value` through the pure `from_value` constructors here,
//! which makes the validation rules unit-testable without a router.

pub mod marketplace;
pub mod provider_keys;
pub mod users;
