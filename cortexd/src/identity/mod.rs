//! Client for the hosted identity provider's admin API.
//!
//! User accounts live in the identity provider, not in our database; this
//! client talks to its admin endpoints with the service key. The back
//! office uses it to enumerate accounts for the user listing and to delete
//! accounts.

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::{
    config::IdentityConfig,
    errors::Error,
    types::{abbrev_uuid, UserId},
};
use chrono::{DateTime, Utc};
use tracing::instrument;

/// Result type for identity provider operations
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Errors from the identity provider's admin API
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider answered with a non-success status
    #[error("Identity provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The request never completed (DNS, TLS, connect, timeout)
    #[error("Identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<IdentityError> for Error {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Upstream { status, message } => Error::Upstream { status, message },
            IdentityError::Transport(e) => Error::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: format!("Identity provider unreachable: {e}"),
            },
        }
    }
}

/// An account as the identity provider reports it.
///
/// The provider returns many more fields; we only deserialize the ones the
/// dashboard shows.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: UserId,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ListUsersResponse {
    users: Vec<IdentityUser>,
}

/// Client for the identity provider's admin endpoints
#[derive(Debug, Clone)]
pub struct IdentityAdminClient {
    http: reqwest::Client,
    base_url: Url,
    service_key: String,
}

impl IdentityAdminClient {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
        }
    }

    fn admin_url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| IdentityError::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: format!("Invalid identity provider URL: {e}"),
        })
    }

    /// List every account the identity provider knows about
    #[instrument(skip(self), err)]
    pub async fn list_users(&self) -> Result<Vec<IdentityUser>> {
        let response = self
            .http
            .get(self.admin_url("admin/users")?)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: ListUsersResponse = response.json().await?;
        Ok(body.users)
    }

    /// Delete an account. Upstream failure statuses are preserved so the
    /// handler can relay them to the dashboard.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn delete_user(&self, user_id: UserId) -> Result<()> {
        let response = self
            .http
            .delete(self.admin_url(&format!("admin/users/{user_id}"))?)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
