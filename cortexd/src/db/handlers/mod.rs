//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed
//! operations, and returns domain models from [`crate::db::models`]. The
//! marketplace catalog implements the full [`Repository`] trait; providers
//! and organizations are read-only lookup tables with bespoke methods, and
//! profiles expose an upsert since the row may not exist yet.

pub mod marketplace_models;
pub mod organizations;
pub mod profiles;
pub mod providers;
pub mod repository;

pub use marketplace_models::MarketplaceModels;
pub use organizations::Organizations;
pub use profiles::Profiles;
pub use providers::Providers;
pub use repository::Repository;
