//! User profile entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    MSG_MISSING_FIELDS, ROLE_ADMIN, ROLE_AGENT, ROLE_FINANCE, ROLE_MANAGER, ROLE_VIEWER,
    STATUS_ACTIVE, STATUS_INACTIVE,
};
use crate::error::{DomainError, DomainResult};

/// CRM user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Agent,
    Finance,
    Viewer,
}

impl UserRole {
    /// String form as stored in the profile table
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Manager => ROLE_MANAGER,
            UserRole::Agent => ROLE_AGENT,
            UserRole::Finance => ROLE_FINANCE,
            UserRole::Viewer => ROLE_VIEWER,
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_MANAGER => Ok(UserRole::Manager),
            ROLE_AGENT => Ok(UserRole::Agent),
            ROLE_FINANCE => Ok(UserRole::Finance),
            ROLE_VIEWER => Ok(UserRole::Viewer),
            other => Err(DomainError::invalid_value("role", other)),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => STATUS_ACTIVE,
            UserStatus::Inactive => STATUS_INACTIVE,
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(UserStatus::Active),
            STATUS_INACTIVE => Ok(UserStatus::Inactive),
            other => Err(DomainError::invalid_value("status", other)),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User profile record.
///
/// `id` is always the identity provider's principal id; it is never generated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Identity principal id
    #[cfg_attr(feature = "openapi", schema(example = "550e8400-e29b-41d4-a716-446655440000"))]
    pub id: Uuid,
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    /// Set by the profile store on insertion
    pub created_at: DateTime<Utc>,
}

/// Input to the provisioning workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl NewUser {
    /// Build a validated provisioning request.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: UserRole,
    ) -> DomainResult<Self> {
        let new_user = Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
        };
        new_user.validate()?;
        Ok(new_user)
    }

    /// All string fields must be present. No format checks are applied to the email.
    pub fn validate(&self) -> DomainResult<()> {
        if self.email.is_empty() || self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(DomainError::validation(MSG_MISSING_FIELDS));
        }
        Ok(())
    }
}

/// Profile row to be written by the profile store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl NewProfile {
    /// Profile for a freshly created identity principal. Status starts as active.
    pub fn for_principal(id: Uuid, user: NewUser) -> Self {
        Self {
            id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            status: UserStatus::Active,
        }
    }
}
