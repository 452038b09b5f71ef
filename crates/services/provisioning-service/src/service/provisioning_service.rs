//! Provisioning service - creates and removes users across both stores.
//!
//! Create runs identity first, then profile. Delete runs in the same order,
//! so a failure on the identity side never touches the profile row.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{NewProfile, NewUser, User, MSG_DUPLICATE_EMAIL, MSG_MISSING_USER_ID};
use identity_service_lib::{temporary_password, CreatePrincipal, IdentityProvider};
use profile_service_lib::ProfileRepository;

use crate::config::OrphanPolicy;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Provisioning service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// List every profile row in storage order
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create an identity principal and its profile row
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Delete the identity principal, then the profile row
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of ProvisioningService.
pub struct Provisioner {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    orphan_policy: OrphanPolicy,
}

impl Provisioner {
    /// Create new provisioning service with its two collaborators
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        orphan_policy: OrphanPolicy,
    ) -> Self {
        Self {
            identity,
            profiles,
            orphan_policy,
        }
    }

    /// Handle a principal whose profile row could not be written.
    async fn handle_orphaned_principal(&self, principal_id: Uuid, email: &str) {
        match self.orphan_policy {
            OrphanPolicy::Preserve => {
                error!(
                    user_id = %principal_id,
                    email = %email,
                    "Identity principal left without a profile row"
                );
            }
            OrphanPolicy::Compensate => {
                warn!(user_id = %principal_id, "Removing orphaned identity principal");
                if let Err(e) = self.identity.delete_principal(principal_id).await {
                    error!(
                        user_id = %principal_id,
                        error = %e,
                        "Failed to remove orphaned identity principal"
                    );
                }
            }
        }
    }
}

#[async_trait]
impl ProvisioningService for Provisioner {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        let users = self.profiles.list().await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        new_user.validate()?;
        info!(email = %new_user.email, role = %new_user.role, "Creating user");

        if self.profiles.find_by_email(&new_user.email).await?.is_some() {
            info!(email = %new_user.email, "Email already provisioned");
            return Err(AppError::duplicate(MSG_DUPLICATE_EMAIL));
        }

        let request = CreatePrincipal::for_new_user(&new_user, temporary_password());
        let principal = self.identity.create_principal(request).await.map_err(|e| {
            error!(email = %new_user.email, error = %e, "Identity principal creation failed");
            AppError::identity_creation(e.to_string())
        })?;
        info!(user_id = %principal.id, "Identity principal created");

        let email = new_user.email.clone();
        let profile = NewProfile::for_principal(principal.id, new_user);
        match self.profiles.insert(profile).await {
            Ok(user) => {
                info!(user_id = %user.id, "Profile row created");
                Ok(user)
            }
            Err(e) => {
                error!(user_id = %principal.id, error = %e, "Profile insert failed");
                self.handle_orphaned_principal(principal.id, &email).await;
                Err(e)
            }
        }
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::validation(MSG_MISSING_USER_ID));
        }
        let user_id: Uuid = id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid user ID: {}", id)))?;
        info!(user_id = %user_id, "Deleting user");

        self.identity.delete_principal(user_id).await.map_err(|e| {
            warn!(user_id = %user_id, error = %e, "Identity principal deletion failed");
            AppError::identity_provider(e.to_string())
        })?;
        debug!(user_id = %user_id, "Identity principal deleted");

        if let Err(e) = self.profiles.delete(user_id).await {
            // Principal is already gone; nothing left to roll back to
            error!(user_id = %user_id, error = %e, "Profile row left without an identity principal");
            return Err(e);
        }

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
