//! Identity provider clients.

mod gotrue_client;
mod identity_provider;

pub use gotrue_client::GoTrueAdminClient;
pub use identity_provider::{CreatePrincipal, IdentityProvider, Principal, PrincipalMetadata};

#[cfg(any(test, feature = "test-utils"))]
pub use identity_provider::MockIdentityProvider;
