//! `PostgreSQL` user repository.
//!
//! Queries are built at runtime with `query_as` so the crate compiles without
//! a live database; rows decode straight into [`User`] through `FromRow`.

use async_trait::async_trait;
use sqlx::PgPool;

use user_registry_core::{Cpf, Email, NewUser, User, UserId, ValidPatch};

use super::{RepositoryError, UserStore};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository over a shared pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, nome, email, telefone, cep, cpf
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or cpf already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (nome, email, telefone, cep, cpf)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nome, email, telefone, cep, cpf
            ",
        )
        .bind(&user.nome)
        .bind(&user.email)
        .bind(&user.telefone)
        .bind(&user.cep)
        .bind(&user.cpf)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this id.
    /// Returns `RepositoryError::Conflict` if the new email or cpf is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn update_by_id(&self, id: UserId, patch: &ValidPatch) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            UPDATE users
            SET nome     = COALESCE($2, nome),
                email    = COALESCE($3, email),
                telefone = COALESCE($4, telefone),
                cep      = COALESCE($5, cep),
                cpf      = COALESCE($6, cpf)
            WHERE id = $1
            RETURNING id, nome, email, telefone, cep, cpf
            ",
        )
        .bind(id)
        .bind(patch.nome.as_deref())
        .bind(patch.email.as_ref().map(Email::as_str))
        .bind(patch.telefone.as_deref())
        .bind(patch.cep.as_deref())
        .bind(patch.cpf.as_ref().map(Cpf::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this id.
    /// Returns `RepositoryError::Database` if the query fails.
    async fn delete_by_id(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map a failed INSERT/UPDATE, turning unique violations into `Conflict`.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        tracing::debug!(
            constraint = db_err.constraint().unwrap_or("unknown"),
            "Unique constraint violated"
        );
        return RepositoryError::Conflict("email or cpf already exists".to_owned());
    }
    RepositoryError::Database(e)
}
