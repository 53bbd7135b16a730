//! Form state: the draft being typed and the user being edited, if any.

use user_registry_core::{Field, User, UserDraft, UserId};

/// Whether submitting the form creates a new user or updates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// No user selected; submit creates.
    Create,
    /// Editing the user with this id; submit updates.
    Edit(UserId),
}

/// The registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    draft: UserDraft,
    editing: Option<User>,
}

impl UserForm {
    /// An empty form in create mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode, derived from whether a user is selected.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.editing
            .as_ref()
            .map_or(FormMode::Create, |user| FormMode::Edit(user.id))
    }

    /// The in-progress draft.
    #[must_use]
    pub const fn draft(&self) -> &UserDraft {
        &self.draft
    }

    /// Read one field of the draft.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    /// Write one field of the draft.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Enter edit mode for `user`, copying its current values into the draft.
    pub fn edit(&mut self, user: &User) {
        self.draft = UserDraft::from(user);
        self.editing = Some(user.clone());
    }

    /// Clear every field. The mode is unchanged.
    pub fn reset(&mut self) {
        self.draft = UserDraft::default();
    }

    /// Leave edit mode and clear every field.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.reset();
    }
}
