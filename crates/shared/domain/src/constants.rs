//! Domain-level constants.
//!
//! These constants define business rules and user-facing messages.

// =============================================================================
// User Roles
// =============================================================================

/// Full administrative access
pub const ROLE_ADMIN: &str = "admin";

/// Manages teams, projects and leads
pub const ROLE_MANAGER: &str = "manager";

/// Sales/site agent working leads and tasks
pub const ROLE_AGENT: &str = "agent";

/// Handles payments and invoicing
pub const ROLE_FINANCE: &str = "finance";

/// Read-only access
pub const ROLE_VIEWER: &str = "viewer";

// =============================================================================
// User Status
// =============================================================================

/// Account is usable
pub const STATUS_ACTIVE: &str = "active";

/// Account is disabled
pub const STATUS_INACTIVE: &str = "inactive";

// =============================================================================
// Messages
// =============================================================================

/// Returned when any of the required creation fields is absent or empty
pub const MSG_MISSING_FIELDS: &str = "Missing required fields";

/// Returned when a delete request carries no user id
pub const MSG_MISSING_USER_ID: &str = "Missing user ID";

/// Returned when the email is already provisioned in the profile store
pub const MSG_DUPLICATE_EMAIL: &str = "A user with this email already exists";
