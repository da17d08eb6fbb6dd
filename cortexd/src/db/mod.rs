//! Database layer: error categorization, repositories, and record models.
//!
//! Repositories wrap a `&mut PgConnection` and expose strongly-typed
//! operations returning the models in [`models`]. Errors are normalized into
//! [`errors::DbError`] so the API layer can translate constraint violations
//! into HTTP statuses.

pub mod errors;
pub mod handlers;
pub mod models;
