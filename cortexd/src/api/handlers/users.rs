//! Handlers for user administration.
//!
//! The listing endpoint fans out to the identity provider (primary, failure
//! is fatal) and to Postgres for profiles and organizations (secondary,
//! failures degrade to `profile: null` plus a warning). The merge itself is
//! a pure function so the join logic is testable without any network.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::warn;

use crate::{
    api::models::users::{
        AdminUserResponse, DeleteUserResponse, ListUsersResponse, OrganizationSummary, ProfileResponse, ProfileSummary, ProfileUpdate,
    },
    auth::AdminUser,
    db::{
        errors::DbError,
        handlers::{Organizations, Profiles},
        models::{
            organizations::OrganizationDBResponse,
            profiles::{ProfileDBResponse, ProfileUpsertDBRequest},
        },
    },
    errors::{Error, Result},
    identity::IdentityUser,
    types::UserId,
    AppState,
};

/// Merge identity accounts with their profile and organization rows.
///
/// `None` for a secondary collection means that fetch failed outright; the
/// merged rows then carry `profile: null` (or `organization: null`) rather
/// than failing the listing.
fn merge_users(
    users: Vec<IdentityUser>,
    profiles: Option<Vec<ProfileDBResponse>>,
    organizations: Option<Vec<OrganizationDBResponse>>,
) -> Vec<AdminUserResponse> {
    let profiles: Option<HashMap<UserId, ProfileDBResponse>> =
        profiles.map(|profiles| profiles.into_iter().map(|p| (p.user_id, p)).collect());
    let organizations: HashMap<_, _> = organizations
        .unwrap_or_default()
        .into_iter()
        .map(|org| (org.id, org))
        .collect();

    users
        .into_iter()
        .map(|user| {
            let profile = profiles.as_ref().and_then(|map| map.get(&user.id)).map(|profile| ProfileSummary {
                full_name: profile.full_name.clone(),
                organization: profile
                    .organization_id
                    .and_then(|org_id| organizations.get(&org_id))
                    .cloned()
                    .map(OrganizationSummary::from),
            });

            AdminUserResponse {
                id: user.id,
                email: user.email,
                created_at: user.created_at,
                email_confirmed_at: user.email_confirmed_at,
                last_sign_in_at: user.last_sign_in_at,
                profile,
            }
        })
        .collect()
}

/// List every user account, enriched with profile and organization data.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    summary = "List users",
    description = "List all accounts from the identity provider, merged with profile and organization data",
    responses(
        (status = 200, description = "User listing", body = ListUsersResponse),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 500, description = "Internal server error"),
        (status = 502, description = "Identity provider unavailable"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn list_users(State(state): State<AppState>, _admin: AdminUser) -> Result<Json<ListUsersResponse>> {
    // Primary fetch: without the account list there is nothing to show.
    let users = state.identity.list_users().await?;
    if users.is_empty() {
        return Ok(Json(ListUsersResponse {
            users: vec![],
            warnings: vec![],
        }));
    }

    let user_ids: Vec<UserId> = users.iter().map(|u| u.id).collect();

    // Secondary fan-out: profiles and organizations enrich the listing but
    // must not take it down.
    let profiles_fut = async {
        let mut conn = state.db.acquire().await.map_err(DbError::from)?;
        Profiles::new(&mut conn).get_for_users(&user_ids).await
    };
    let organizations_fut = async {
        let mut conn = state.db.acquire().await.map_err(DbError::from)?;
        Organizations::new(&mut conn).list().await
    };
    let (profiles, organizations) = tokio::join!(profiles_fut, organizations_fut);

    let mut warnings = Vec::new();
    let profiles = match profiles {
        Ok(profiles) => Some(profiles),
        Err(e) => {
            warn!("Profile fetch failed during user listing: {e}");
            warnings.push(format!("Error fetching profiles: {e}"));
            None
        }
    };
    let organizations = match organizations {
        Ok(organizations) => Some(organizations),
        Err(e) => {
            warn!("Organization fetch failed during user listing: {e}");
            warnings.push(format!("Error fetching organizations: {e}"));
            None
        }
    };

    Ok(Json(ListUsersResponse {
        users: merge_users(users, profiles, organizations),
        warnings,
    }))
}

/// Update (or create) a user's profile.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    summary = "Update user profile",
    description = "Upsert the profile row for a user. The body must contain `full_name` (string or null)",
    params(
        ("id" = String, Path, description = "User ID (UUID)"),
    ),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Bad request - no updatable fields provided"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn update_user_profile(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<UserId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ProfileResponse>> {
    let update: ProfileUpdate = serde_json::from_value(body).map_err(|_| Error::BadRequest {
        message: "Invalid data type for full_name. Must be a string or null.".to_string(),
    })?;

    let Some(full_name) = update.normalized_full_name() else {
        return Err(Error::BadRequest {
            message: "No data provided for update in request body.".to_string(),
        });
    };

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let profile = Profiles::new(&mut conn)
        .upsert(&ProfileUpsertDBRequest { user_id, full_name })
        .await?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// Permanently delete a user account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    summary = "Delete user",
    description = "Permanently remove the account from the identity provider. The profile row is left in place",
    params(
        ("id" = String, Path, description = "User ID (UUID)"),
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "User not found at the identity provider"),
        (status = 502, description = "Identity provider unavailable"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<DeleteUserResponse>> {
    // Upstream failures (including 404 for unknown ids) keep their status.
    state.identity.delete_user(user_id).await?;

    Ok(Json(DeleteUserResponse {
        success: true,
        message: format!("User {user_id} deleted successfully."),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn account(id: UserId, email: &str) -> IdentityUser {
        IdentityUser {
            id,
            email: Some(email.to_string()),
            created_at: None,
            email_confirmed_at: None,
            last_sign_in_at: None,
        }
    }

    fn profile(user_id: UserId, full_name: &str, organization_id: Option<i64>) -> ProfileDBResponse {
        ProfileDBResponse {
            user_id,
            full_name: Some(full_name.to_string()),
            organization_id,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn merge_joins_profiles_and_organizations_by_id() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let users = vec![account(alice, "alice@example.com"), account(bob, "bob@example.com")];
        let profiles = vec![profile(alice, "Alice", Some(7))];
        let organizations = vec![OrganizationDBResponse {
            id: 7,
            name: "Acme".to_string(),
        }];

        let merged = merge_users(users, Some(profiles), Some(organizations));

        assert_eq!(merged.len(), 2);
        let alice_row = merged.iter().find(|u| u.id == alice).unwrap();
        let alice_profile = alice_row.profile.as_ref().unwrap();
        assert_eq!(alice_profile.full_name.as_deref(), Some("Alice"));
        assert_eq!(alice_profile.organization.as_ref().unwrap().name, "Acme");

        // Bob has no profile row at all.
        let bob_row = merged.iter().find(|u| u.id == bob).unwrap();
        assert!(bob_row.profile.is_none());
    }

    #[test]
    fn failed_profile_fetch_yields_null_profiles() {
        let alice = Uuid::new_v4();
        let merged = merge_users(vec![account(alice, "alice@example.com")], None, Some(vec![]));
        assert_eq!(merged.len(), 1);
        assert!(merged[0].profile.is_none());
        assert_eq!(merged[0].email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn failed_organization_fetch_keeps_profiles_without_orgs() {
        let alice = Uuid::new_v4();
        let merged = merge_users(
            vec![account(alice, "alice@example.com")],
            Some(vec![profile(alice, "Alice", Some(7))]),
            None,
        );
        let alice_profile = merged[0].profile.as_ref().unwrap();
        assert_eq!(alice_profile.full_name.as_deref(), Some("Alice"));
        assert!(alice_profile.organization.is_none());
    }

    #[test]
    fn dangling_organization_reference_merges_to_null() {
        let alice = Uuid::new_v4();
        let merged = merge_users(
            vec![account(alice, "alice@example.com")],
            Some(vec![profile(alice, "Alice", Some(99))]),
            Some(vec![]),
        );
        assert!(merged[0].profile.as_ref().unwrap().organization.is_none());
    }
}
