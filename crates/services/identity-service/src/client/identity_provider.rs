//! Identity provider abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::{NewUser, UserRole};

use crate::error::IdentityResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile hints stored alongside the principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalMetadata {
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Request to create an authentication principal.
#[derive(Clone, PartialEq, Eq)]
pub struct CreatePrincipal {
    pub email: String,
    pub password: String,
    pub metadata: PrincipalMetadata,
    /// Mark the email as already verified
    pub email_confirmed: bool,
}

impl CreatePrincipal {
    /// Principal for a user provisioned by an administrator: email pre-confirmed.
    pub fn for_new_user(user: &NewUser, password: String) -> Self {
        Self {
            email: user.email.clone(),
            password,
            metadata: PrincipalMetadata {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                role: user.role,
            },
            email_confirmed: true,
        }
    }
}

impl std::fmt::Debug for CreatePrincipal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatePrincipal")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("metadata", &self.metadata)
            .field("email_confirmed", &self.email_confirmed)
            .finish()
    }
}

/// Authentication principal issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable unique id; becomes the profile row's primary key
    pub id: Uuid,
    pub email: String,
}

/// Admin operations consumed from the identity provider.
///
/// The provider enforces email uniqueness within its own store.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a principal
    async fn create_principal(&self, request: CreatePrincipal) -> IdentityResult<Principal>;

    /// Delete a principal by id
    async fn delete_principal(&self, id: Uuid) -> IdentityResult<()>;
}
