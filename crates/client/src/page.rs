//! The users page: cached list, form, and error banner.
//!
//! Every action reports failure through [`UsersPage::error`]. Nothing here
//! returns an error to the caller; a banner is the only failure signal.

use user_registry_core::{Field, NewUser, User, UserId, UserPatch};

use crate::api::UsersApi;
use crate::form::{FormMode, UserForm};
use crate::messages;

/// Page controller over a [`UsersApi`].
#[derive(Debug)]
pub struct UsersPage<A> {
    api: A,
    users: Vec<User>,
    form: UserForm,
    error: Option<String>,
}

impl<A: UsersApi> UsersPage<A> {
    /// An empty page. Call [`Self::load`] to fetch the list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            form: UserForm::new(),
            error: None,
        }
    }

    /// The API handle.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Users as of the last fetch, minus any deleted since.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The form: draft values and current mode.
    pub const fn form(&self) -> &UserForm {
        &self.form
    }

    /// Current banner text, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Type into one form field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Replace the local list with the server's.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "users loaded");
                self.users = users;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load users");
                self.error = Some(messages::api(&e, messages::LOAD_FAILED));
            }
        }
    }

    /// Create in Create mode, update in Edit mode.
    pub async fn submit(&mut self) {
        match self.form.mode() {
            FormMode::Create => self.create().await,
            FormMode::Edit(_) => self.update().await,
        }
    }

    /// Validate the draft and POST it. On success the form is cleared and
    /// the list refetched; on failure the draft is kept.
    pub async fn create(&mut self) {
        let Some(new_user) = self.validate() else {
            return;
        };

        match self.api.create(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user created");
                self.reset();
                self.load().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create user");
                self.error = Some(messages::api(&e, messages::CREATE_FAILED));
            }
        }
    }

    /// Validate the draft and PUT it over the user being edited. Does
    /// nothing outside Edit mode.
    pub async fn update(&mut self) {
        let FormMode::Edit(id) = self.form.mode() else {
            return;
        };
        let Some(new_user) = self.validate() else {
            return;
        };

        match self.api.update(id, &UserPatch::from(new_user)).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user updated");
                self.cancel();
                self.load().await;
            }
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "failed to update user");
                self.error = Some(messages::api(&e, messages::UPDATE_FAILED));
            }
        }
    }

    /// DELETE the user and drop it from the local list without refetching.
    pub async fn delete(&mut self, id: UserId) {
        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(user_id = %id, "user deleted");
                self.users.retain(|user| user.id != id);
                if self.form.mode() == FormMode::Edit(id) {
                    self.form.cancel();
                }
            }
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "failed to delete user");
                self.error = Some(messages::api(&e, messages::DELETE_FAILED));
            }
        }
    }

    /// Start editing a listed user.
    pub fn edit(&mut self, id: UserId) {
        match self.users.iter().find(|user| user.id == id) {
            Some(user) => self.form.edit(user),
            None => self.error = Some(messages::USER_NOT_FOUND.to_owned()),
        }
    }

    /// Leave Edit mode, clear the draft and the banner.
    pub fn cancel(&mut self) {
        self.form.cancel();
        self.error = None;
    }

    /// Clear the draft and the banner, keeping the mode.
    pub fn reset(&mut self) {
        self.form.reset();
        self.error = None;
    }

    /// Run the pre-submission checks. A pass clears the banner.
    fn validate(&mut self) -> Option<NewUser> {
        match self.form.draft().validate() {
            Ok(new_user) => {
                self.error = None;
                Some(new_user)
            }
            Err(e) => {
                tracing::debug!(field = %e.field(), error = %e, "draft rejected");
                self.error = Some(messages::validation(&e));
                None
            }
        }
    }
}
