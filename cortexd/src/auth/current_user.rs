//! Extractors for the proxy-provided caller identity.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace, warn};

use crate::{
    errors::{Error, Result},
    AppState,
};

/// The identity the authenticating proxy attached to this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
}

/// A caller whose email matches the configured administrator email.
///
/// Admin handlers take this as an argument so the gate runs before any
/// handler logic executes.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

/// Extract the caller's email from the trusted proxy header.
/// Returns:
/// - None: header absent
/// - Some(Ok(user)): header present and readable
/// - Some(Err(error)): header present but not valid UTF-8
fn try_proxy_header_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let header = parts.headers.get(&config.auth.header_name)?;

    match header.to_str() {
        Ok(email) if !email.is_empty() => Some(Ok(CurrentUser {
            email: email.to_string(),
        })),
        Ok(_) => None,
        Err(e) => Some(Err(Error::BadRequest {
            message: format!("Invalid identity header: {e}"),
        })),
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_proxy_header_auth(parts, &state.config) {
            Some(Ok(user)) => {
                debug!("Authenticated proxied user: {}", user.email);
                Ok(user)
            }
            Some(Err(e)) => Err(e),
            None => {
                trace!("No identity header on request");
                Err(Error::Forbidden {
                    message: "Admin access required".to_string(),
                })
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        // Deliberately fail closed when deployment never set an admin email.
        let Some(admin_email) = state.config.auth.admin_email.as_deref() else {
            warn!("Admin route hit but no admin email is configured");
            return Err(Error::Internal {
                operation: "admin access check".to_string(),
            });
        };

        // Exact, case-sensitive comparison. The proxy canonicalizes emails
        // before injecting the header.
        if user.email != admin_email {
            debug!("Rejecting non-admin user: {}", user.email);
            return Err(Error::Forbidden {
                message: "Admin access required".to_string(),
            });
        }

        Ok(AdminUser(user))
    }
}
