//! API request/response models for upstream key provisioning.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::provisioning::ProvisionedKey;

/// Validated request body for `POST /api/admin/openrouter/keys`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCreate {
    pub name: String,
    pub limit: Option<f64>,
}

impl KeyCreate {
    /// Validate a raw JSON body. Error strings are user-facing and map to 400.
    pub fn from_value(body: &Value) -> Result<Self, String> {
        let name = match body.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Err("Key name is required.".to_string()),
        };

        let limit = match body.get("limit") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_f64() {
                Some(limit) if limit >= 0.0 => Some(limit),
                _ => return Err("Limit must be a non-negative number or null.".to_string()),
            },
        };

        Ok(Self { name, limit })
    }
}

/// Key details as the broker reports them after creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyResponse {
    pub hash: String,
    pub label: Option<String>,
    pub name: String,
    pub limit: Option<f64>,
    pub created_at: Option<String>,
}

impl From<ProvisionedKey> for KeyResponse {
    fn from(key: ProvisionedKey) -> Self {
        Self {
            hash: key.hash,
            label: key.label,
            name: key.name,
            limit: key.limit,
            created_at: key.created_at,
        }
    }
}

/// Response for a successful key creation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyCreateResponse {
    pub success: bool,
    pub message: String,
    pub new_key_data: KeyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_is_required_and_trimmed() {
        let create = KeyCreate::from_value(&json!({ "name": "  staging key " })).unwrap();
        assert_eq!(create.name, "staging key");
        assert_eq!(create.limit, None);

        assert!(KeyCreate::from_value(&json!({})).is_err());
        assert!(KeyCreate::from_value(&json!({ "name": "" })).is_err());
        assert!(KeyCreate::from_value(&json!({ "name": 42 })).is_err());
    }

    #[test]
    fn limit_must_be_non_negative_when_present() {
        let create = KeyCreate::from_value(&json!({ "name": "k", "limit": 25.0 })).unwrap();
        assert_eq!(create.limit, Some(25.0));

        let create = KeyCreate::from_value(&json!({ "name": "k", "limit": null })).unwrap();
        assert_eq!(create.limit, None);

        assert!(KeyCreate::from_value(&json!({ "name": "k", "limit": -1 })).is_err());
        assert!(KeyCreate::from_value(&json!({ "name": "k", "limit": "25" })).is_err());
    }
}
