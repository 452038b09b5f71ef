//! Provisioning workflow configuration.

use std::env;

/// What to do with an identity principal left behind when the profile
/// insert fails after the principal was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Log the orphan at error level and leave it in place
    #[default]
    Preserve,
    /// Best-effort deletion of the orphaned principal
    Compensate,
}

/// Provisioning workflow configuration.
#[derive(Debug, Clone, Default)]
pub struct ProvisioningConfig {
    pub orphan_policy: OrphanPolicy,
}

impl ProvisioningConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let compensate = env::var("PROVISIONING_COMPENSATE_ORPHANS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            orphan_policy: if compensate {
                OrphanPolicy::Compensate
            } else {
                OrphanPolicy::Preserve
            },
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
