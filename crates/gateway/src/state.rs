//! Application state for dependency injection.

use std::sync::Arc;

use profile_service_lib::Database;
use provisioning_service_lib::ProvisioningService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub provisioning: Arc<dyn ProvisioningService>,
    /// Profile store handle, used by the health check
    pub database: Database,
}

impl AppState {
    /// Create new app state.
    pub fn new(provisioning: Arc<dyn ProvisioningService>, database: Database) -> Self {
        Self {
            provisioning,
            database,
        }
    }
}
