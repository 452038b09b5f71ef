//! Profile Service Library
//!
//! Persistence for user profile rows: the SeaORM entity, the repository
//! consumed by the provisioning workflow, and schema migrations.

pub mod infra;
pub mod repository;

use tracing::info;

use common::DatabaseConfig;

pub use crate::infra::Database;
pub use crate::repository::{ProfileRepository, ProfileStore};

#[cfg(any(test, feature = "test-utils"))]
pub use crate::repository::MockProfileRepository;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
