//! Database repository for user profiles.
//!
//! Profiles are a sparse side table keyed by the identity provider's user
//! ID. A user may have no profile row at all, so writes are upserts and
//! bulk reads simply skip users without one.

use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::Result,
        models::profiles::{ProfileDBResponse, ProfileUpsertDBRequest},
    },
    types::{abbrev_uuid, UserId},
};

pub struct Profiles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Profiles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Create or update a user's profile row
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    pub async fn upsert(&mut self, request: &ProfileUpsertDBRequest) -> Result<ProfileDBResponse> {
        let profile = sqlx::query_as::<_, ProfileDBResponse>(
            r#"
            INSERT INTO profiles (user_id, full_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET full_name = EXCLUDED.full_name, updated_at = NOW()
            RETURNING user_id, full_name, organization_id, updated_at
            "#,
        )
        .bind(request.user_id)
        .bind(&request.full_name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(profile)
    }

    /// Fetch the profile rows for a set of users. Users without a profile
    /// are absent from the result.
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()), err)]
    pub async fn get_for_users(&mut self, user_ids: &[UserId]) -> Result<Vec<ProfileDBResponse>> {
        let profiles = sqlx::query_as::<_, ProfileDBResponse>(
            r#"
            SELECT user_id, full_name, organization_id, updated_at
            FROM profiles
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(profiles)
    }
}
