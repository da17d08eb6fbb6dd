//! Client for the upstream inference broker's key provisioning API.
//!
//! CortexDeploy resells access through a broker; customer-facing API keys
//! are minted there with a provisioning key this service holds. Only key
//! creation is wired up so far.

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::{config::ProvisioningConfig, errors::Error};
use tracing::instrument;

/// Result type for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisioningError>;

/// Errors from the broker's provisioning API
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    /// Our provisioning key was rejected
    #[error("Provisioning key rejected by the broker")]
    InvalidCredentials,

    /// Any other non-success answer from the broker
    #[error("Broker returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never completed (DNS, TLS, connect, timeout)
    #[error("Broker unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ProvisioningError> for Error {
    fn from(err: ProvisioningError) -> Self {
        match err {
            ProvisioningError::InvalidCredentials => Error::Upstream {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                message: "Invalid provisioning credentials".to_string(),
            },
            ProvisioningError::Api { status, message } => {
                tracing::error!("Broker provisioning call failed with {status}: {message}");
                Error::Upstream {
                    status: StatusCode::BAD_GATEWAY.as_u16(),
                    message: format!("Failed to create key with upstream provider: {message}"),
                }
            }
            ProvisioningError::Transport(e) => Error::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: format!("Failed to reach upstream provider: {e}"),
            },
        }
    }
}

/// A key as the broker reports it after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionedKey {
    pub hash: String,
    pub label: Option<String>,
    pub name: String,
    pub limit: Option<f64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateKeyResponse {
    data: ProvisionedKey,
}

/// Client for the broker's provisioning endpoints
#[derive(Debug, Clone)]
pub struct ProvisioningClient {
    http: reqwest::Client,
    base_url: Url,
    provisioning_key: String,
}

impl ProvisioningClient {
    pub fn new(config: &ProvisioningConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            provisioning_key: config.provisioning_key.clone(),
        }
    }

    /// Mint a new customer API key, optionally capped at a spend limit
    #[instrument(skip(self), fields(name = %name, limit = limit), err)]
    pub async fn create_key(&self, name: &str, limit: Option<f64>) -> Result<ProvisionedKey> {
        let url = self.base_url.join("keys").map_err(|e| ProvisioningError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: format!("Invalid broker URL: {e}"),
        })?;

        // The broker treats a missing limit as unlimited; never send null.
        let mut payload = serde_json::json!({ "name": name });
        if let Some(limit) = limit {
            payload["limit"] = serde_json::json!(limit);
        }

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.provisioning_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProvisioningError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProvisioningError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CreateKeyResponse = response.json().await?;
        Ok(body.data)
    }
}
