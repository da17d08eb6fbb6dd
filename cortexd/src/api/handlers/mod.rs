//! Route handlers for the admin API.

pub mod marketplace;
pub mod provider_keys;
pub mod users;
