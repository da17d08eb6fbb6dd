use crate::types::{ModelId, ProviderId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database request for creating a marketplace model listing.
///
/// The provider reference has already been resolved from the human-provided
/// provider name by the time this request is built.
#[derive(Debug, Clone)]
pub struct ModelCreateDBRequest {
    pub provider_id: ProviderId,
    pub provider_model_id: String,
    pub display_name: String,
    pub model_type: String,
    pub context_window: Option<i32>,
    pub provider_cost_per_million_input: Decimal,
    pub provider_cost_per_million_output: Decimal,
    pub selling_price_per_million_input: Decimal,
    pub selling_price_per_million_output: Decimal,
    pub is_available: bool,
}

/// Database request for updating a listing. Availability is the only
/// admin-mutable field.
#[derive(Debug, Clone)]
pub struct ModelUpdateDBRequest {
    pub is_available: bool,
}

/// Database response for a marketplace model row, with the provider name
/// joined in for the listing view (NULL if the provider row is gone).
#[derive(Debug, Clone, FromRow)]
pub struct ModelDBResponse {
    pub id: ModelId,
    pub provider_id: ProviderId,
    pub provider_model_id: String,
    pub display_name: String,
    pub model_type: String,
    pub context_window: Option<i32>,
    pub provider_cost_per_million_input: Decimal,
    pub provider_cost_per_million_output: Decimal,
    pub selling_price_per_million_input: Decimal,
    pub selling_price_per_million_output: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub provider_name: Option<String>,
}
