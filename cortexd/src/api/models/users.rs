//! API request/response models for users and profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use utoipa::ToSchema;

use crate::{
    db::models::{organizations::OrganizationDBResponse, profiles::ProfileDBResponse},
    types::{OrganizationId, UserId},
};

/// Organization summary embedded in user listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationSummary {
    pub id: OrganizationId,
    pub name: String,
}

impl From<OrganizationDBResponse> for OrganizationSummary {
    fn from(org: OrganizationDBResponse) -> Self {
        Self {
            id: org.id,
            name: org.name,
        }
    }
}

/// Profile data merged into a user listing entry. Users without a profile
/// row get `profile: null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileSummary {
    pub full_name: Option<String>,
    pub organization: Option<OrganizationSummary>,
}

/// A user as shown on the admin dashboard: the identity provider's account
/// enriched with our profile and organization data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminUserResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub profile: Option<ProfileSummary>,
}

/// Response for `GET /api/admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<AdminUserResponse>,
    /// Non-fatal problems hit while enriching the listing (e.g. the profile
    /// fetch failing). Purely diagnostic, not a stable contract.
    pub warnings: Vec<String>,
}

/// Request body for `PATCH /api/admin/users/{id}`.
///
/// `full_name` distinguishes "absent" (no update requested, rejected with
/// 400) from an explicit `null` (clear the name).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub full_name: Option<Option<String>>,
}

impl ProfileUpdate {
    /// Normalize the requested name: trim whitespace, and treat blank or
    /// explicit null as clearing the field. Returns `None` when the field
    /// was absent from the body.
    pub fn normalized_full_name(&self) -> Option<Option<String>> {
        self.full_name.as_ref().map(|value| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
    }
}

/// Response for a profile upsert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub organization_id: Option<OrganizationId>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDBResponse> for ProfileResponse {
    fn from(profile: ProfileDBResponse) -> Self {
        Self {
            user_id: profile.user_id,
            full_name: profile.full_name,
            organization_id: profile.organization_id,
            updated_at: profile.updated_at,
        }
    }
}

/// Response for a user deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_full_name_stays_absent() {
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(update.normalized_full_name().is_none());
    }

    #[test]
    fn explicit_null_clears_the_name() {
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({ "full_name": null })).unwrap();
        assert_eq!(update.normalized_full_name(), Some(None));
    }

    #[test]
    fn blank_name_is_treated_as_null() {
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({ "full_name": "   " })).unwrap();
        assert_eq!(update.normalized_full_name(), Some(None));
    }

    #[test]
    fn name_is_trimmed() {
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({ "full_name": "  Ada Lovelace " })).unwrap();
        assert_eq!(update.normalized_full_name(), Some(Some("Ada Lovelace".to_string())));
    }
}
