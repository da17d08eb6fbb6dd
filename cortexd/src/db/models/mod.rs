//! Database record models matching table schemas.
//!
//! Structs here map one-to-one onto table rows (deriving `sqlx::FromRow`
//! where they are read back from queries) and are kept separate from the API
//! models so the storage and API representations can evolve independently.

pub mod marketplace_models;
pub mod organizations;
pub mod profiles;
pub mod providers;
