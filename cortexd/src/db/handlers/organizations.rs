//! Database repository for organizations.
//!
//! Organizations are managed elsewhere; the back office only reads them to
//! decorate user listings with an organization name.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{errors::Result, models::organizations::OrganizationDBResponse};

pub struct Organizations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Organizations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List every organization
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<OrganizationDBResponse>> {
        let organizations = sqlx::query_as::<_, OrganizationDBResponse>(
            "SELECT id, name FROM organizations ORDER BY name",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(organizations)
    }
}
