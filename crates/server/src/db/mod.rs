//! Persistence access for the `users` table.
//!
//! # Database
//!
//! ## Tables
//!
//! - `users` - Registered users, unique on `email` and on `cpf`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p user-registry-cli -- migrate
//! ```
//!
//! # Stores
//!
//! Handlers talk to a [`UserStore`] trait object held by
//! [`AppState`](crate::state::AppState):
//!
//! - [`UserRepository`] - `PostgreSQL`, used by the server binary
//! - [`InMemoryUserStore`] - process-local, used by tests

pub mod memory;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use user_registry_core::{NewUser, User, UserId, ValidPatch};

pub use memory::InMemoryUserStore;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique email or cpf).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage operations over registered users.
///
/// Uniqueness of `email` and `cpf` is the store's job; callers only see
/// [`RepositoryError::Conflict`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Insert a user and return it with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Overwrite the supplied fields of user `id` and return the result.
    async fn update_by_id(&self, id: UserId, patch: &ValidPatch) -> Result<User, RepositoryError>;

    /// Remove user `id`.
    async fn delete_by_id(&self, id: UserId) -> Result<(), RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
