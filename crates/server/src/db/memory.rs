//! Process-local user store.
//!
//! Mirrors the `PostgreSQL` table's behavior: ids come from a counter that
//! only moves forward, and `email`/`cpf` are unique.

use async_trait::async_trait;
use tokio::sync::RwLock;

use user_registry_core::{NewUser, User, UserId, ValidPatch};

use super::{RepositoryError, UserStore};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<User>,
    last_id: i32,
}

impl Table {
    /// Whether a row other than `except` already holds this email or cpf.
    fn collides(&self, candidate: &User, except: Option<UserId>) -> bool {
        self.rows
            .iter()
            .filter(|row| Some(row.id) != except)
            .any(|row| row.email == candidate.email || row.cpf == candidate.cpf)
    }
}

/// In-memory implementation of [`UserStore`].
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: RwLock<Table>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict() -> RepositoryError {
    RepositoryError::Conflict("email or cpf already exists".to_owned())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;

        let next_id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::DataCorruption("user id sequence exhausted".to_owned()))?;
        let created = user.clone().into_user(UserId::new(next_id));

        if table.collides(&created, None) {
            return Err(conflict());
        }

        table.last_id = next_id;
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn update_by_id(&self, id: UserId, patch: &ValidPatch) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;

        let mut updated = table
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;
        patch.apply_to(&mut updated);

        if table.collides(&updated, Some(id)) {
            return Err(conflict());
        }

        if let Some(row) = table.rows.iter_mut().find(|row| row.id == id) {
            *row = updated.clone();
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);

        if table.rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
