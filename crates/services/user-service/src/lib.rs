//! User Service Library
//!
//! Users, professional profiles and profile search over a SeaORM store.
//! The HTTP gateway embeds this crate and talks to it through the
//! [`service::Services`] container.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::service::Services;

/// Connect to the configured database, apply migrations and wire services.
pub async fn bootstrap(
    config: &UserServiceConfig,
) -> Result<(Database, Services), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let services = Services::from_connection(db.get_connection());
    Ok((db, services))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

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

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
