//! Seed the database with users from a YAML file.
//!
//! The file is a list of users with the same five fields the form has:
//!
//! ```yaml
//! - nome: Ana Souza
//!   email: ana@example.com
//!   telefone: "(11) 4000-0000"
//!   cep: 01001-000
//!   cpf: 529.982.247-25
//! ```
//!
//! Every entry is validated first. Entries that fail validation or collide
//! with an existing email or cpf are logged and skipped.

use std::path::Path;

use tracing::{error, info, warn};

use user_registry_core::UserDraft;
use user_registry_server::config::RegistryConfig;
use user_registry_server::db::{self, RepositoryError, UserRepository, UserStore};

use super::CommandError;

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Rows written.
    pub inserted: usize,
    /// Entries whose email or cpf was already taken.
    pub duplicates: usize,
    /// Entries that failed validation.
    pub invalid: usize,
}

/// Parse the seed file contents.
///
/// # Errors
///
/// Returns error if the text is not a YAML list of users.
pub fn parse(content: &str) -> Result<Vec<UserDraft>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Insert `drafts` into `store` one by one.
///
/// # Errors
///
/// Returns the first store error other than a duplicate key.
pub async fn seed_store(
    store: &dyn UserStore,
    drafts: &[UserDraft],
) -> Result<SeedSummary, RepositoryError> {
    let mut summary = SeedSummary::default();

    for (index, draft) in drafts.iter().enumerate() {
        let new_user = match draft.validate() {
            Ok(new_user) => new_user,
            Err(e) => {
                error!(entry = index, error = %e, "Skipping invalid entry");
                summary.invalid += 1;
                continue;
            }
        };

        match store.insert(&new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "Inserted user");
                summary.inserted += 1;
            }
            Err(RepositoryError::Conflict(reason)) => {
                warn!(entry = index, email = %new_user.email, %reason, "Skipping duplicate");
                summary.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Seed users from a YAML file.
///
/// # Errors
///
/// Returns error if configuration is missing, the file cannot be read or
/// parsed, or a database operation fails.
pub async fn users(file_path: &str) -> Result<SeedSummary, CommandError> {
    let config = RegistryConfig::from_env()?;

    info!(path = %file_path, "Loading users from file");

    // Read and parse before connecting to the database
    let content = tokio::fs::read_to_string(Path::new(file_path))
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.to_owned(),
            source,
        })?;
    let drafts = parse(&content)?;

    info!(entries = drafts.len(), "Parsed seed file");

    let pool = db::create_pool(&config.database_url).await?;
    info!("Connected to database");

    let repo = UserRepository::new(pool);
    let summary = seed_store(&repo, &drafts).await?;

    info!("Seeding complete!");
    info!("  Inserted: {}", summary.inserted);
    info!("  Skipped (duplicate): {}", summary.duplicates);
    info!("  Skipped (invalid): {}", summary.invalid);

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use user_registry_server::db::InMemoryUserStore;

    use super::*;

    const SEED: &str = r#"
- nome: Ana Souza
  email: ana@example.com
  telefone: "(11) 4000-0000"
  cep: 01001-000
  cpf: 529.982.247-25
- nome: Ana de Novo
  email: ana@example.com
  telefone: "(11) 4000-0001"
  cep: 01001-000
  cpf: 111.444.777-35
- nome: Sem Email
  telefone: "(11) 4000-0002"
  cep: 01001-000
  cpf: 390.533.447-05
- nome: Bruno Lima
  email: bruno@example.com
  telefone: "(21) 98888-7777"
  cep: 20040-020
  cpf: "39053344705"
"#;

    #[test]
    fn test_parse_missing_fields_default_to_empty() {
        let drafts = parse(SEED).unwrap();
        assert_eq!(drafts.len(), 4);
        assert_eq!(drafts[0].nome, "Ana Souza");
        assert_eq!(drafts[2].email, "");
    }

    #[test]
    fn test_parse_rejects_non_list() {
        assert!(parse("nome: Ana").is_err());
    }

    #[tokio::test]
    async fn test_seed_skips_duplicates_and_invalid() {
        let store = InMemoryUserStore::new();
        let drafts = parse(SEED).unwrap();

        let summary = seed_store(&store, &drafts).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                inserted: 2,
                duplicates: 1,
                invalid: 1,
            }
        );

        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].cpf.as_str(), "52998224725");
        assert_eq!(users[1].nome, "Bruno Lima");
    }

    #[tokio::test]
    async fn test_seed_twice_inserts_nothing_new() {
        let store = InMemoryUserStore::new();
        let drafts = parse(SEED).unwrap();

        seed_store(&store, &drafts).await.unwrap();
        let again = seed_store(&store, &drafts).await.unwrap();

        assert_eq!(again.inserted, 0);
        assert_eq!(again.duplicates, 3);
    }
}
