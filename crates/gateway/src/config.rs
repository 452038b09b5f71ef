//! Gateway configuration.

use common::{DatabaseConfig, IdentityProviderConfig, ServiceConfig};
use provisioning_service_lib::ProvisioningConfig;

/// Service name reported in logs.
pub const SERVICE_NAME: &str = "crm-provisioning";

/// Everything the HTTP process needs to wire its collaborators.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub identity: IdentityProviderConfig,
    pub provisioning: ProvisioningConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServiceConfig::from_env(SERVICE_NAME),
            database: DatabaseConfig::from_env(),
            identity: IdentityProviderConfig::from_env(),
            provisioning: ProvisioningConfig::from_env(),
        }
    }

    /// Apply bind address overrides from the command line.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}
