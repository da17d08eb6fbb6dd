use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Caller is not the configured admin identity
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Conflict error, e.g., for unique constraint violations
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// A dependency (identity provider, provisioning API) failed; the
    /// recorded status is forwarded to the caller.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Forbidden { message } => message.clone(),
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::Conflict { message } => message.clone(),
            Error::Upstream { message, .. } => message.clone(),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => {
                    // Provide user-friendly messages for common unique constraint violations
                    match (table.as_deref(), constraint.as_deref()) {
                        (Some("marketplace_models"), Some("marketplace_models_provider_model_unique")) => {
                            "A model with this provider model ID already exists for this provider.".to_string()
                        }
                        (Some("api_providers"), Some(c)) if c.contains("name") => {
                            "A provider with this name already exists".to_string()
                        }
                        _ => "Resource already exists".to_string(),
                    }
                }
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Upstream { .. } => {
                tracing::warn!("Upstream dependency error: {}", self);
            }
            Error::Forbidden { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Conflict { .. } => {
                tracing::warn!("Conflict error: {}", self);
            }
        }

        let status = self.status_code();

        match &self {
            // Conflicts carry a structured JSON body so callers can show the message
            Error::Conflict { .. } | Error::Database(DbError::UniqueViolation { .. }) => {
                let body = serde_json::json!({ "message": self.user_message() });
                (status, axum::response::Json(body)).into_response()
            }
            _ => (status, self.user_message()).into_response(),
        }
    }
}

/// Convert from String errors (e.g., from external functions)
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal { operation: msg }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_taxonomy() {
        let forbidden = Error::Forbidden {
            message: "nope".into(),
        };
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

        let bad = Error::BadRequest { message: "bad".into() };
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

        let conflict = Error::Conflict { message: "dup".into() };
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        let upstream = Error::Upstream {
            status: 401,
            message: "invalid provisioning key".into(),
        };
        assert_eq!(upstream.status_code(), StatusCode::UNAUTHORIZED);

        // Out-of-range upstream statuses degrade to 502
        let weird = Error::Upstream {
            status: 42,
            message: "?".into(),
        };
        assert_eq!(weird.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn db_errors_map_to_http_statuses() {
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);

        let unique = Error::Database(DbError::UniqueViolation {
            constraint: Some("marketplace_models_provider_model_unique".into()),
            table: Some("marketplace_models".into()),
            message: "duplicate key".into(),
        });
        assert_eq!(unique.status_code(), StatusCode::CONFLICT);
        assert!(unique.user_message().contains("already exists for this provider"));

        let fk = Error::Database(DbError::ForeignKeyViolation {
            constraint: None,
            table: None,
            message: "fk".into(),
        });
        assert_eq!(fk.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = Error::Internal {
            operation: "connect to secret database at 10.0.0.3".into(),
        };
        assert_eq!(err.user_message(), "Internal server error");
    }
}
