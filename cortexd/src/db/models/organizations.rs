use crate::types::OrganizationId;
use sqlx::FromRow;

/// Database response for an organization row. Read-only from this service.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationDBResponse {
    pub id: OrganizationId,
    pub name: String,
}
