//! Identity Service Library
//!
//! Admin access to the external identity provider: creating and deleting
//! authentication principals. The provider issues the ids that key every
//! profile row.

pub mod client;
pub mod error;
pub mod password;

pub use client::{
    CreatePrincipal, GoTrueAdminClient, IdentityProvider, Principal, PrincipalMetadata,
};
pub use error::{IdentityError, IdentityResult};
pub use password::temporary_password;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockIdentityProvider;
