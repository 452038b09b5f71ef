//! Identity provider errors.

use thiserror::Error;

/// Errors returned by an identity provider.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The HTTP request failed (network error, timeout, etc.).
    #[error("Identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The provider answered with a body that could not be understood.
    #[error("Invalid identity provider response: {0}")]
    InvalidResponse(String),
}

impl IdentityError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        IdentityError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// HTTP status reported by the provider, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            IdentityError::Rejected { status, .. } => Some(*status),
            IdentityError::Request(e) => e.status().map(|s| s.as_u16()),
            IdentityError::InvalidResponse(_) => None,
        }
    }
}

/// Result type alias for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;
