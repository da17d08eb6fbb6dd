//! Handler for provisioning customer API keys at the upstream broker.

use axum::{extract::State, response::Json};

use crate::{
    api::models::provider_keys::{KeyCreate, KeyCreateResponse},
    auth::AdminUser,
    errors::{Error, Result},
    AppState,
};

/// Mint a new API key at the upstream broker.
#[utoipa::path(
    post,
    path = "/openrouter/keys",
    tag = "provider_keys",
    summary = "Create provider API key",
    description = "Create a named, optionally spend-limited API key at the upstream broker using the server's provisioning credential",
    responses(
        (status = 200, description = "Key created", body = KeyCreateResponse),
        (status = 400, description = "Bad request - missing name or negative limit"),
        (status = 401, description = "The server's provisioning credential was rejected upstream"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 502, description = "Broker unavailable or rejected the request"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn create_provider_key(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<KeyCreateResponse>> {
    let create = KeyCreate::from_value(&body).map_err(|message| Error::BadRequest { message })?;

    let key = state.provisioning.create_key(&create.name, create.limit).await?;

    Ok(Json(KeyCreateResponse {
        success: true,
        message: format!("Key \"{}\" created successfully.", key.name),
        new_key_data: key.into(),
    }))
}
