//! Database repository for marketplace model listings.

use std::collections::HashMap;

use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::marketplace_models::{ModelCreateDBRequest, ModelDBResponse, ModelUpdateDBRequest},
    },
    types::{ModelId, ProviderId},
};

/// Filter for listing marketplace models
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    /// Restrict the listing to a single provider
    pub provider_id: Option<ProviderId>,
}

pub struct MarketplaceModels<'c> {
    db: &'c mut PgConnection,
}

impl<'c> MarketplaceModels<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

// Every read goes through a LEFT JOIN onto api_providers so the response
// carries the provider name (NULL if the provider row has been removed).
const MODEL_COLUMNS: &str = r#"
    m.id, m.provider_id, m.provider_model_id, m.display_name, m.model_type,
    m.context_window,
    m.provider_cost_per_million_input, m.provider_cost_per_million_output,
    m.selling_price_per_million_input, m.selling_price_per_million_output,
    m.is_available, m.created_at, m.updated_at,
    p.name AS provider_name
"#;

#[async_trait::async_trait]
impl<'c> Repository for MarketplaceModels<'c> {
    type CreateRequest = ModelCreateDBRequest;
    type UpdateRequest = ModelUpdateDBRequest;
    type Response = ModelDBResponse;
    type Id = ModelId;
    type Filter = ModelFilter;

    #[instrument(
        skip(self, request),
        fields(provider_id = request.provider_id, provider_model_id = %request.provider_model_id),
        err
    )]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let query = format!(
            r#"
            WITH m AS (
                INSERT INTO marketplace_models (
                    provider_id, provider_model_id, display_name, model_type,
                    context_window,
                    provider_cost_per_million_input, provider_cost_per_million_output,
                    selling_price_per_million_input, selling_price_per_million_output,
                    is_available
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            SELECT {MODEL_COLUMNS}
            FROM m
            LEFT JOIN api_providers p ON p.id = m.provider_id
            "#
        );

        let model = sqlx::query_as::<_, ModelDBResponse>(&query)
            .bind(request.provider_id)
            .bind(&request.provider_model_id)
            .bind(&request.display_name)
            .bind(&request.model_type)
            .bind(request.context_window)
            .bind(request.provider_cost_per_million_input)
            .bind(request.provider_cost_per_million_output)
            .bind(request.selling_price_per_million_input)
            .bind(request.selling_price_per_million_output)
            .bind(request.is_available)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(model)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let query = format!(
            r#"
            SELECT {MODEL_COLUMNS}
            FROM marketplace_models m
            LEFT JOIN api_providers p ON p.id = m.provider_id
            WHERE m.id = $1
            "#
        );

        let model = sqlx::query_as::<_, ModelDBResponse>(&query)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(model)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>> {
        let query = format!(
            r#"
            SELECT {MODEL_COLUMNS}
            FROM marketplace_models m
            LEFT JOIN api_providers p ON p.id = m.provider_id
            WHERE m.id = ANY($1)
            "#
        );

        let models = sqlx::query_as::<_, ModelDBResponse>(&query)
            .bind(&ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(models.into_iter().map(|m| (m.id, m)).collect())
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let query = format!(
            r#"
            SELECT {MODEL_COLUMNS}
            FROM marketplace_models m
            LEFT JOIN api_providers p ON p.id = m.provider_id
            WHERE ($1::INT4 IS NULL OR m.provider_id = $1)
            ORDER BY m.provider_id, m.display_name
            "#
        );

        let models = sqlx::query_as::<_, ModelDBResponse>(&query)
            .bind(filter.provider_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(models)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM marketplace_models WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(is_available = request.is_available), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let query = format!(
            r#"
            WITH m AS (
                UPDATE marketplace_models
                SET is_available = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {MODEL_COLUMNS}
            FROM m
            LEFT JOIN api_providers p ON p.id = m.provider_id
            "#
        );

        let model = sqlx::query_as::<_, ModelDBResponse>(&query)
            .bind(id)
            .bind(request.is_available)
            .fetch_optional(&mut *self.db)
            .await?;

        model.ok_or(DbError::NotFound)
    }
}
