//! # cortexd: CortexDeploy Admin Control Plane
//!
//! `cortexd` is the back-office API for CortexDeploy, a SaaS reselling access
//! to AI model APIs. It serves the admin dashboard: user account
//! administration, the marketplace catalog of priced model listings, and
//! provisioning of customer API keys at the upstream broker.
//!
//! ## Overview
//!
//! The service owns the catalog data in PostgreSQL (providers, marketplace
//! models, user profiles, organizations) but not the user accounts
//! themselves; those live in a hosted identity provider that `cortexd` talks
//! to over its admin API with a privileged service key. Customer-facing API
//! keys are minted at the upstream inference broker with a provisioning
//! credential that never leaves the server.
//!
//! ### Request Flow
//!
//! The service runs behind an authenticating proxy that injects the caller's
//! verified email in a trusted header. Every admin route extracts an
//! [`auth::AdminUser`], which compares that email against the single
//! configured administrator address before any handler logic runs. Handlers
//! then work through repository interfaces over the PostgreSQL pool
//! ([`db`]), or through the typed upstream clients ([`identity`],
//! [`provisioning`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use cortexd::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = cortexd::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     cortexd::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Migrations are embedded and run automatically on startup.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod identity;
mod openapi;
pub mod provisioning;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;

use axum::{
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use bon::Builder;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
pub use types::{ModelId, OrganizationId, ProviderId, UserId};

use crate::{identity::IdentityAdminClient, openapi::ApiDoc, provisioning::ProvisioningClient};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: PostgreSQL connection pool for catalog data
/// - `config`: Application configuration loaded from environment/files
/// - `identity`: Client for the identity provider's admin API
/// - `provisioning`: Client for the upstream broker's key provisioning API
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub identity: IdentityAdminClient,
    pub provisioning: ProvisioningClient,
}

/// Get the cortexd database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.as_str().parse::<HeaderValue>()?);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// - Admin API routes nested under `/api/admin`
/// - Liveness probe at `/healthz`
/// - OpenAPI spec and Scalar UI at `/admin/docs`
/// - CORS and tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let admin_routes = Router::new()
        .route("/users", get(api::handlers::users::list_users))
        .route("/users/{id}", patch(api::handlers::users::update_user_profile))
        .route("/users/{id}", delete(api::handlers::users::delete_user))
        .route("/marketplace", get(api::handlers::marketplace::list_marketplace))
        .route("/marketplace", post(api::handlers::marketplace::create_model))
        .route("/marketplace/{id}", patch(api::handlers::marketplace::update_model_availability))
        .route("/openrouter/keys", post(api::handlers::provider_keys::create_provider_key))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/admin", admin_routes)
        .merge(Scalar::with_url("/admin/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The running application: router, state, and owned resources.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPool::connect(&config.database_url).await?;
        migrator().run(&pool).await?;

        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .identity(IdentityAdminClient::new(&config.identity))
            .provisioning(ProvisioningClient::new(&config.provisioning))
            .build();

        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("cortexd listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
