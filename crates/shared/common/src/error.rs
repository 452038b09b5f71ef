//! Unified error handling for the provisioning API.
//!
//! Every workflow step reports its failure through [`AppError`], which converts
//! into an Axum HTTP response with a `{"error": ..., "code": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    // Identity provider
    #[error("Failed to create identity principal: {0}")]
    IdentityCreation(String),

    #[error("{0}")]
    IdentityProvider(String),

    // Profile store
    #[error("{0}")]
    StoreConflict(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[source] sea_orm::DbErr),

    // Anything uncaught
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Duplicate(_) => "DUPLICATE_EMAIL",
            AppError::IdentityCreation(_) => "IDENTITY_CREATION_ERROR",
            AppError::IdentityProvider(_) => "IDENTITY_PROVIDER_ERROR",
            AppError::StoreConflict(_) => "STORE_CONFLICT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Duplicate(_)
            | AppError::IdentityProvider(_)
            | AppError::StoreConflict(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::Duplicate(msg)
            | AppError::IdentityCreation(msg)
            | AppError::IdentityProvider(msg)
            | AppError::StoreConflict(msg) => msg.clone(),

            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            err @ DomainError::InvalidValue { .. } => AppError::Validation(err.to_string()),
        }
    }
}

/// Postgres SQLSTATE for a unique constraint violation
#[cfg(feature = "database")]
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for a foreign-key constraint violation
#[cfg(feature = "database")]
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Unique and foreign-key violations are reported to the caller; anything else is opaque.
#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match store_conflict(&err) {
            Some(msg) => AppError::StoreConflict(msg),
            None => AppError::Database(err),
        }
    }
}

/// Constraint violation message, if `err` is one.
///
/// `sql_err()` only recognises errors raised by the native driver types, so the
/// SQLSTATE on the wrapped database error is checked as well.
#[cfg(feature = "database")]
fn store_conflict(err: &sea_orm::DbErr) -> Option<String> {
    use sea_orm::{DbErr, RuntimeErr, SqlErr};

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Some(msg),
        _ => {}
    }

    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e))) => {
            match e.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) | Some(PG_FOREIGN_KEY_VIOLATION) => {
                    Some(e.message().to_string())
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        AppError::Duplicate(msg.into())
    }

    pub fn identity_creation(msg: impl Into<String>) -> Self {
        AppError::IdentityCreation(msg.into())
    }

    pub fn identity_provider(msg: impl Into<String>) -> Self {
        AppError::IdentityProvider(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
