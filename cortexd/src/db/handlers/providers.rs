//! Database repository for API providers.
//!
//! Providers are seeded out of band, so this repository is read-only: a
//! listing of active providers for the dashboard dropdown, and a
//! case-insensitive name lookup used when validating new marketplace
//! listings.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{errors::Result, models::providers::ProviderDBResponse};

pub struct Providers<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Providers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List providers currently accepting new listings
    #[instrument(skip(self), err)]
    pub async fn list_active(&mut self) -> Result<Vec<ProviderDBResponse>> {
        let providers = sqlx::query_as::<_, ProviderDBResponse>(
            "SELECT id, name, is_active FROM api_providers WHERE is_active ORDER BY name",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(providers)
    }

    /// Look up a provider by name, ignoring case
    #[instrument(skip(self), err)]
    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<ProviderDBResponse>> {
        let provider = sqlx::query_as::<_, ProviderDBResponse>(
            "SELECT id, name, is_active FROM api_providers WHERE name ILIKE $1",
        )
        .bind(name)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(provider)
    }
}
