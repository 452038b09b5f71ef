//! Provisioning Service Library
//!
//! Orchestrates user creation and deletion across the identity provider and
//! the profile store. The two stores are not transactionally linked; the
//! workflow owns the invariant that every profile id names a live principal.

pub mod config;
pub mod service;

pub use config::{OrphanPolicy, ProvisioningConfig};
pub use service::{Provisioner, ProvisioningService};

#[cfg(any(test, feature = "test-utils"))]
pub use service::MockProvisioningService;
