//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! registry-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `REGISTRY_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! `crates/server/migrations/`

use tracing::info;

use user_registry_server::config::RegistryConfig;
use user_registry_server::db;

use super::CommandError;

/// Apply every pending migration to the registry database.
///
/// # Errors
///
/// Returns error if configuration is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = RegistryConfig::from_env()?;

    info!("Connecting to registry database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running registry migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Registry migrations complete!");
    Ok(())
}
