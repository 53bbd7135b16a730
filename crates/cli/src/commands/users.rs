//! User management through the registry API.
//!
//! Each command loads the users page, performs one action, and prints the
//! rendered page. An error banner ends the command with a non-zero exit.
//!
//! # Environment Variables
//!
//! - `REGISTRY_API_URL` - Base URL of the server (default `http://localhost:3333`)

use clap::Args;

use user_registry_client::{HttpUsersApi, UsersApi, UsersPage, render_page};
use user_registry_core::{Field, UserId};

use super::CommandError;

/// Fields of a new user. All are required.
#[derive(Debug, Args)]
pub struct NewUserArgs {
    #[arg(long)]
    pub nome: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub telefone: String,
    #[arg(long)]
    pub cep: String,
    /// With or without punctuation
    #[arg(long)]
    pub cpf: String,
}

impl NewUserArgs {
    fn values(&self) -> [(Field, Option<&str>); 5] {
        [
            (Field::Nome, Some(self.nome.as_str())),
            (Field::Email, Some(self.email.as_str())),
            (Field::Telefone, Some(self.telefone.as_str())),
            (Field::Cep, Some(self.cep.as_str())),
            (Field::Cpf, Some(self.cpf.as_str())),
        ]
    }
}

/// Fields to change. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub nome: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefone: Option<String>,
    #[arg(long)]
    pub cep: Option<String>,
    #[arg(long)]
    pub cpf: Option<String>,
}

impl EditArgs {
    fn values(&self) -> [(Field, Option<&str>); 5] {
        [
            (Field::Nome, self.nome.as_deref()),
            (Field::Email, self.email.as_deref()),
            (Field::Telefone, self.telefone.as_deref()),
            (Field::Cep, self.cep.as_deref()),
            (Field::Cpf, self.cpf.as_deref()),
        ]
    }
}

/// Build a page over `api` and fetch the list. A failed fetch ends the
/// command.
///
/// # Errors
///
/// Returns the load banner as [`CommandError::Page`].
pub async fn load_page<A: UsersApi>(api: A) -> Result<UsersPage<A>, CommandError> {
    let mut page = UsersPage::new(api);
    page.load().await;
    outcome(&page)?;
    Ok(page)
}

async fn open_page() -> Result<UsersPage<HttpUsersApi>, CommandError> {
    dotenvy::dotenv().ok();

    let api = HttpUsersApi::from_env()?;
    tracing::debug!(url = %api.users_url(), "Using registry API");

    load_page(api).await
}

/// Turn a banner into an error.
fn outcome<A: UsersApi>(page: &UsersPage<A>) -> Result<(), CommandError> {
    match page.error() {
        Some(banner) => Err(CommandError::Page(banner.to_owned())),
        None => Ok(()),
    }
}

/// Print the page, then report its banner.
fn finish<A: UsersApi>(page: &UsersPage<A>) -> Result<(), CommandError> {
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_page(page));
    }

    outcome(page)
}

fn fill<A: UsersApi>(page: &mut UsersPage<A>, values: [(Field, Option<&str>); 5]) {
    for (field, value) in values {
        if let Some(value) = value {
            page.set(field, value);
        }
    }
}

/// Fill the form with every field and submit it as a new user.
pub async fn add_user<A: UsersApi>(page: &mut UsersPage<A>, args: &NewUserArgs) {
    fill(page, args.values());
    page.submit().await;
}

/// Edit user `id`, overwriting only the fields given in `args`.
pub async fn edit_user<A: UsersApi>(page: &mut UsersPage<A>, id: UserId, args: &EditArgs) {
    page.edit(id);
    if page.error().is_none() {
        fill(page, args.values());
        page.submit().await;
    }
}

/// Print all users.
///
/// # Errors
///
/// Returns error if the API URL is invalid or the list cannot be fetched.
pub async fn list() -> Result<(), CommandError> {
    let page = open_page().await?;
    finish(&page)
}

/// Register a new user.
///
/// # Errors
///
/// Returns error if the fields are invalid or the server rejects the user.
pub async fn add(args: &NewUserArgs) -> Result<(), CommandError> {
    let mut page = open_page().await?;
    add_user(&mut page, args).await;
    finish(&page)
}

/// Change the given fields of user `id`.
///
/// # Errors
///
/// Returns error if the user is not listed, the fields are invalid, or the
/// server rejects the update.
pub async fn edit(id: UserId, args: &EditArgs) -> Result<(), CommandError> {
    let mut page = open_page().await?;
    edit_user(&mut page, id, args).await;
    finish(&page)
}

/// Remove user `id`.
///
/// # Errors
///
/// Returns error if the server rejects the delete.
pub async fn delete(id: UserId) -> Result<(), CommandError> {
    let mut page = open_page().await?;
    page.delete(id).await;
    finish(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use user_registry_client::{ApiError, messages};
    use user_registry_core::{NewUser, User, UserPatch};
    use user_registry_server::db::{InMemoryUserStore, RepositoryError, UserStore};

    use super::*;

    /// `UsersApi` answered straight from an in-memory store, with the
    /// server's status mapping.
    #[derive(Debug, Default)]
    struct StoreApi {
        store: InMemoryUserStore,
    }

    fn to_api(err: RepositoryError) -> ApiError {
        match err {
            RepositoryError::Conflict(message) => ApiError::Conflict(message),
            RepositoryError::NotFound => ApiError::Status {
                status: 404,
                message: "user not found".to_owned(),
            },
            other => ApiError::Status {
                status: 500,
                message: other.to_string(),
            },
        }
    }

    #[async_trait]
    impl UsersApi for StoreApi {
        async fn list(&self) -> Result<Vec<User>, ApiError> {
            self.store.list().await.map_err(to_api)
        }

        async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
            self.store.insert(user).await.map_err(to_api)
        }

        async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
            let patch = patch.validate().map_err(|e| ApiError::Status {
                status: 400,
                message: e.to_string(),
            })?;
            self.store.update_by_id(id, &patch).await.map_err(to_api)
        }

        async fn delete(&self, id: UserId) -> Result<(), ApiError> {
            self.store.delete_by_id(id).await.map_err(to_api)
        }
    }

    fn ana() -> NewUserArgs {
        NewUserArgs {
            nome: "Ana Souza".to_owned(),
            email: "ana@example.com".to_owned(),
            telefone: "(11) 4000-0000".to_owned(),
            cep: "01001-000".to_owned(),
            cpf: "529.982.247-25".to_owned(),
        }
    }

    fn no_changes() -> EditArgs {
        EditArgs {
            nome: None,
            email: None,
            telefone: None,
            cep: None,
            cpf: None,
        }
    }

    async fn page_with_ana() -> UsersPage<StoreApi> {
        let mut page = load_page(StoreApi::default()).await.unwrap();
        add_user(&mut page, &ana()).await;
        outcome(&page).unwrap();
        page
    }

    #[tokio::test]
    async fn test_add_stores_digits_only_cpf() {
        let page = page_with_ana().await;

        let stored = page.api().store.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].cpf.as_str(), "52998224725");
        assert_eq!(page.users(), stored.as_slice());
    }

    #[tokio::test]
    async fn test_add_duplicate_is_an_error() {
        let mut page = page_with_ana().await;

        add_user(&mut page, &ana()).await;

        assert!(matches!(
            outcome(&page),
            Err(CommandError::Page(ref banner)) if banner == messages::DUPLICATE_USER
        ));
    }

    #[tokio::test]
    async fn test_add_invalid_fields_is_an_error() {
        let mut page = load_page(StoreApi::default()).await.unwrap();
        let args = NewUserArgs {
            cpf: "123".to_owned(),
            ..ana()
        };

        add_user(&mut page, &args).await;

        assert!(matches!(
            outcome(&page),
            Err(CommandError::Page(ref banner)) if banner == messages::INVALID_CPF
        ));
        assert!(page.api().store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_changes_only_given_flags() {
        let mut page = page_with_ana().await;
        let id = page.users()[0].id;
        let args = EditArgs {
            telefone: Some("(11) 4000-1111".to_owned()),
            ..no_changes()
        };

        edit_user(&mut page, id, &args).await;
        outcome(&page).unwrap();

        let stored = page.api().store.list().await.unwrap();
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].telefone, "(11) 4000-1111");
        assert_eq!(stored[0].nome, "Ana Souza");
        assert_eq!(stored[0].email.as_str(), "ana@example.com");
        assert_eq!(stored[0].cep, "01001-000");
        assert_eq!(stored[0].cpf.as_str(), "52998224725");
    }

    #[tokio::test]
    async fn test_edit_unknown_id_is_an_error() {
        let mut page = page_with_ana().await;

        edit_user(&mut page, UserId::new(42), &no_changes()).await;

        assert!(matches!(
            outcome(&page),
            Err(CommandError::Page(ref banner)) if banner == messages::USER_NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_an_error() {
        let mut page = page_with_ana().await;
        let id = page.users()[0].id;

        page.delete(id).await;
        outcome(&page).unwrap();
        assert!(page.api().store.list().await.unwrap().is_empty());

        page.delete(id).await;
        assert!(outcome(&page).is_err());
    }
}
