//! Service layer - provisioning workflow.

mod provisioning_service;

pub use provisioning_service::{Provisioner, ProvisioningService};

#[cfg(any(test, feature = "test-utils"))]
pub use provisioning_service::MockProvisioningService;
