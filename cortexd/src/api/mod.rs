//! API layer: request handlers and wire models.
//!
//! - **[`handlers`]**: Axum route handlers for the admin endpoints
//! - **[`models`]**: Request and response types, separate from the database
//!   models so each side can evolve independently

pub mod handlers;
pub mod models;
