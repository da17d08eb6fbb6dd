use crate::types::{OrganizationId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for upserting a user's profile.
///
/// Profiles are a sparse side table: the row may not exist yet, so writes go
/// through `INSERT ... ON CONFLICT (user_id) DO UPDATE`.
#[derive(Debug, Clone)]
pub struct ProfileUpsertDBRequest {
    pub user_id: UserId,
    pub full_name: Option<String>,
}

/// Database response for a profile row
#[derive(Debug, Clone, FromRow)]
pub struct ProfileDBResponse {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub organization_id: Option<OrganizationId>,
    pub updated_at: DateTime<Utc>,
}
