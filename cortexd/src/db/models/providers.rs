use crate::types::ProviderId;
use sqlx::FromRow;

/// Database response for an API provider row. Providers are seeded out of
/// band and are a read-only lookup target for this service.
#[derive(Debug, Clone, FromRow)]
pub struct ProviderDBResponse {
    pub id: ProviderId,
    pub name: String,
    pub is_active: bool,
}
