//! Handlers for the marketplace model catalog.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::{
    api::models::marketplace::{
        AvailabilityUpdate, MarketplaceListResponse, ModelCreate, ModelCreateResponse, ModelResponse, ProviderResponse,
    },
    auth::AdminUser,
    db::{
        errors::DbError,
        handlers::{marketplace_models::ModelFilter, MarketplaceModels, Providers, Repository},
        models::marketplace_models::{ModelCreateDBRequest, ModelUpdateDBRequest},
    },
    errors::{Error, Result},
    types::ModelId,
    AppState,
};

/// List all model listings together with the active providers.
#[utoipa::path(
    get,
    path = "/marketplace",
    tag = "marketplace",
    summary = "List marketplace models",
    description = "List every model listing joined with its provider name, plus the providers available for new listings",
    responses(
        (status = 200, description = "Marketplace listing", body = MarketplaceListResponse),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn list_marketplace(State(state): State<AppState>, _admin: AdminUser) -> Result<Json<MarketplaceListResponse>> {
    // Both collections are required for the dashboard; either failure is fatal.
    let models_fut = async {
        let mut conn = state.db.acquire().await.map_err(DbError::from)?;
        MarketplaceModels::new(&mut conn).list(&ModelFilter::default()).await
    };
    let providers_fut = async {
        let mut conn = state.db.acquire().await.map_err(DbError::from)?;
        Providers::new(&mut conn).list_active().await
    };
    let (models, providers) = tokio::try_join!(models_fut, providers_fut)?;

    Ok(Json(MarketplaceListResponse {
        models: models.into_iter().map(ModelResponse::from).collect(),
        providers: providers.into_iter().map(ProviderResponse::from).collect(),
    }))
}

/// Create a new model listing.
#[utoipa::path(
    post,
    path = "/marketplace",
    tag = "marketplace",
    summary = "Create marketplace model",
    description = "Create a model listing. The provider is referenced by name and resolved case-insensitively",
    responses(
        (status = 200, description = "Model created", body = ModelCreateResponse),
        (status = 400, description = "Bad request - missing fields, bad prices, or unknown provider"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 409, description = "Conflict - provider model ID already listed for this provider"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn create_model(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ModelCreateResponse>> {
    let create = ModelCreate::from_value(&body).map_err(|message| Error::BadRequest { message })?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    // An unresolvable provider name is a caller mistake, not a missing resource.
    let provider = Providers::new(&mut conn)
        .find_by_name(&create.provider_name)
        .await?
        .ok_or_else(|| Error::BadRequest {
            message: format!("Provider \"{}\" not found.", create.provider_name),
        })?;

    let request = ModelCreateDBRequest {
        provider_id: provider.id,
        provider_model_id: create.provider_model_id,
        display_name: create.display_name,
        model_type: create.model_type,
        context_window: create.context_window,
        provider_cost_per_million_input: create.provider_cost_per_million_input,
        provider_cost_per_million_output: create.provider_cost_per_million_output,
        selling_price_per_million_input: create.selling_price_per_million_input,
        selling_price_per_million_output: create.selling_price_per_million_output,
        is_available: create.is_available,
    };

    // Unique violations surface as 409 via the error mapping.
    let model = MarketplaceModels::new(&mut conn).create(&request).await?;

    Ok(Json(ModelCreateResponse {
        success: true,
        message: format!("Model \"{}\" added successfully.", model.display_name),
        new_model_id: model.id,
    }))
}

/// Toggle a listing's availability.
#[utoipa::path(
    patch,
    path = "/marketplace/{id}",
    tag = "marketplace",
    summary = "Update model availability",
    description = "Set the `is_available` flag on a listing. The body must contain a boolean `is_available`",
    params(
        ("id" = i64, Path, description = "Model listing ID"),
    ),
    responses(
        (status = 200, description = "Model updated", body = ModelResponse),
        (status = 400, description = "Bad request - is_available missing or not a boolean"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "No listing with this ID"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("X-Cortexd-User" = [])
    )
)]
pub async fn update_model_availability(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ModelId>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ModelResponse>> {
    let update = AvailabilityUpdate::from_value(&body).map_err(|message| Error::BadRequest { message })?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let model = MarketplaceModels::new(&mut conn)
        .update(
            id,
            &ModelUpdateDBRequest {
                is_available: update.is_available,
            },
        )
        .await?;

    Ok(Json(ModelResponse::from(model)))
}
