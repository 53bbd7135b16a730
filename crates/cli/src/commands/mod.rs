//! Subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod users;

use thiserror::Error;

use user_registry_client::ApiError;
use user_registry_server::config::ConfigError;
use user_registry_server::db::RepositoryError;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Server configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Seed file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Seed file is not a YAML list of users.
    #[error("invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The API client could not be built.
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// The page ended with an error banner.
    #[error("{0}")]
    Page(String),
}
