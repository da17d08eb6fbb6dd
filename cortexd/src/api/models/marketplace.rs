//! API request/response models for the marketplace catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::{
    db::models::{marketplace_models::ModelDBResponse, providers::ProviderDBResponse},
    types::{ModelId, ProviderId},
};

/// A priced model listing, joined with its provider's name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelResponse {
    pub id: ModelId,
    pub provider_id: ProviderId,
    pub provider_name: Option<String>,
    pub provider_model_id: String,
    pub display_name: String,
    pub model_type: String,
    pub context_window: Option<i32>,
    #[schema(value_type = String)]
    pub provider_cost_per_million_input: Decimal,
    #[schema(value_type = String)]
    pub provider_cost_per_million_output: Decimal,
    #[schema(value_type = String)]
    pub selling_price_per_million_input: Decimal,
    #[schema(value_type = String)]
    pub selling_price_per_million_output: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ModelDBResponse> for ModelResponse {
    fn from(model: ModelDBResponse) -> Self {
        Self {
            id: model.id,
            provider_id: model.provider_id,
            provider_name: model.provider_name,
            provider_model_id: model.provider_model_id,
            display_name: model.display_name,
            model_type: model.model_type,
            context_window: model.context_window,
            provider_cost_per_million_input: model.provider_cost_per_million_input,
            provider_cost_per_million_output: model.provider_cost_per_million_output,
            selling_price_per_million_input: model.selling_price_per_million_input,
            selling_price_per_million_output: model.selling_price_per_million_output,
            is_available: model.is_available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Provider entry for the dashboard's provider dropdown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderResponse {
    pub id: ProviderId,
    pub name: String,
}

impl From<ProviderDBResponse> for ProviderResponse {
    fn from(provider: ProviderDBResponse) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
        }
    }
}

/// Response for `GET /api/admin/marketplace`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarketplaceListResponse {
    pub models: Vec<ModelResponse>,
    pub providers: Vec<ProviderResponse>,
}

/// Response for a successful model creation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelCreateResponse {
    pub success: bool,
    pub message: String,
    pub new_model_id: ModelId,
}

/// Validated request body for `POST /api/admin/marketplace`.
///
/// The dashboard sends prices as decimal strings but older revisions sent
/// raw numbers, so both are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCreate {
    pub provider_name: String,
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

const STRING_FIELDS: [&str; 4] = ["provider_name", "provider_model_id", "display_name", "model_type"];
const PRICE_FIELDS: [&str; 4] = [
    "provider_cost_per_million_input",
    "provider_cost_per_million_output",
    "selling_price_per_million_input",
    "selling_price_per_million_output",
];

/// A field counts as missing when absent, null, or blank after stringification.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn string_field(body: &Value, field: &str) -> Result<String, String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| "Invalid data types for required fields.".to_string())
}

fn price_field(body: &Value, field: &str) -> Result<Decimal, String> {
    body.get(field)
        .and_then(parse_decimal)
        .ok_or_else(|| format!("Invalid number format for price field: {field}"))
}

impl ModelCreate {
    /// Validate a raw JSON body. Error strings are user-facing and map to 400.
    pub fn from_value(body: &Value) -> Result<Self, String> {
        let missing: Vec<&str> = STRING_FIELDS
            .iter()
            .chain(PRICE_FIELDS.iter())
            .copied()
            .filter(|field| is_missing(body.get(*field)))
            .collect();
        if !missing.is_empty() {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        }

        let context_window = match body.get("context_window") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
                Some(n) => Some(n),
                None => return Err("Invalid number format for context_window".to_string()),
            },
        };

        let is_available = match body.get("is_available") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err("Invalid data type for is_available. Must be a boolean.".to_string()),
        };

        Ok(Self {
            provider_name: string_field(body, "provider_name")?,
            provider_model_id: string_field(body, "provider_model_id")?,
            display_name: string_field(body, "display_name")?,
            model_type: string_field(body, "model_type")?,
            context_window,
            provider_cost_per_million_input: price_field(body, "provider_cost_per_million_input")?,
            provider_cost_per_million_output: price_field(body, "provider_cost_per_million_output")?,
            selling_price_per_million_input: price_field(body, "selling_price_per_million_input")?,
            selling_price_per_million_output: price_field(body, "selling_price_per_million_output")?,
            is_available,
        })
    }
}

/// Validated request body for `PATCH /api/admin/marketplace/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

impl AvailabilityUpdate {
    /// Availability must be an actual boolean; anything else is a 400.
    pub fn from_value(body: &Value) -> Result<Self, String> {
        match body.get("is_available") {
            Some(Value::Bool(is_available)) => Ok(Self {
                is_available: *is_available,
            }),
            _ => Err("Invalid or missing is_available field (must be true or false).".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "provider_name": "OpenRouter",
            "provider_model_id": "gpt-x",
            "display_name": "GPT X",
            "model_type": "chat",
            "provider_cost_per_million_input": "1.00",
            "provider_cost_per_million_output": "2.00",
            "selling_price_per_million_input": "1.50",
            "selling_price_per_million_output": "3.00"
        })
    }

    #[test]
    fn valid_body_parses() {
        let create = ModelCreate::from_value(&valid_body()).unwrap();
        assert_eq!(create.provider_name, "OpenRouter");
        assert_eq!(create.selling_price_per_million_output, Decimal::from_str("3.00").unwrap());
        assert!(!create.is_available);
        assert_eq!(create.context_window, None);
    }

    #[test]
    fn missing_fields_are_named() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("display_name");
        body.as_object_mut().unwrap().remove("model_type");
        let err = ModelCreate::from_value(&body).unwrap_err();
        assert_eq!(err, "Missing required fields: display_name, model_type");
    }

    #[test]
    fn blank_string_counts_as_missing() {
        let mut body = valid_body();
        body["provider_name"] = json!("   ");
        let err = ModelCreate::from_value(&body).unwrap_err();
        assert!(err.contains("provider_name"));
    }

    #[test]
    fn numeric_prices_are_accepted() {
        let mut body = valid_body();
        body["provider_cost_per_million_input"] = json!(1.25);
        let create = ModelCreate::from_value(&body).unwrap();
        assert_eq!(create.provider_cost_per_million_input, Decimal::from_str("1.25").unwrap());
    }

    #[test]
    fn garbage_price_is_rejected() {
        let mut body = valid_body();
        body["selling_price_per_million_input"] = json!("a lot");
        let err = ModelCreate::from_value(&body).unwrap_err();
        assert_eq!(err, "Invalid number format for price field: selling_price_per_million_input");
    }

    #[test]
    fn non_string_name_is_a_type_error() {
        let mut body = valid_body();
        body["display_name"] = json!(42);
        let err = ModelCreate::from_value(&body).unwrap_err();
        assert_eq!(err, "Invalid data types for required fields.");
    }

    #[test]
    fn strings_are_trimmed() {
        let mut body = valid_body();
        body["provider_model_id"] = json!("  gpt-x  ");
        let create = ModelCreate::from_value(&body).unwrap();
        assert_eq!(create.provider_model_id, "gpt-x");
    }

    #[test]
    fn availability_flag_defaults_to_false_and_honors_true() {
        let mut body = valid_body();
        body["is_available"] = json!(true);
        assert!(ModelCreate::from_value(&body).unwrap().is_available);
    }

    #[test]
    fn availability_patch_requires_a_boolean() {
        assert!(AvailabilityUpdate::from_value(&json!({ "is_available": true })).is_ok());
        assert!(AvailabilityUpdate::from_value(&json!({ "is_available": "true" })).is_err());
        assert!(AvailabilityUpdate::from_value(&json!({ "is_available": 1 })).is_err());
        assert!(AvailabilityUpdate::from_value(&json!({})).is_err());
        assert!(AvailabilityUpdate::from_value(&json!({ "is_available": null })).is_err());
    }
}
