//! The user entity and the shapes it takes on the way in.
//!
//! - [`User`] - a stored record, as returned by the API
//! - [`UserDraft`] - raw form input, every field a string
//! - [`NewUser`] - a draft that passed validation, ready to insert
//! - [`UserPatch`] - a partial update as received from a client
//! - [`ValidPatch`] - a patch whose present fields passed validation

use serde::{Deserialize, Serialize};

use super::validation::require;
use super::{Cpf, Email, Field, UserId, ValidationError};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    /// Server-assigned identifier, never reused.
    pub id: UserId,
    /// Full name.
    pub nome: String,
    /// Email address, unique across users.
    pub email: Email,
    /// Phone number (free text).
    pub telefone: String,
    /// Postal code (free text).
    pub cep: String,
    /// National identifier digits, unique across users.
    pub cpf: Cpf,
}

/// Unvalidated user attributes, exactly as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    /// Full name.
    pub nome: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub telefone: String,
    /// Postal code.
    pub cep: String,
    /// National identifier, with or without punctuation.
    pub cpf: String,
}

impl UserDraft {
    /// Read one field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nome => &self.nome,
            Field::Email => &self.email,
            Field::Telefone => &self.telefone,
            Field::Cep => &self.cep,
            Field::Cpf => &self.cpf,
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Nome => &mut self.nome,
            Field::Email => &mut self.email,
            Field::Telefone => &mut self.telefone,
            Field::Cep => &mut self.cep,
            Field::Cpf => &mut self.cpf,
        };
        *slot = value.into();
    }

    /// Whether every field is the empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.get(field).is_empty())
    }

    /// Validate the draft, stopping at the first failure.
    ///
    /// Checks run in this order:
    /// 1. every field is non-empty after trimming, in [`Field::ALL`] order
    /// 2. the email is shaped like `local@domain.tld`
    /// 3. the cpf has exactly 11 digits once punctuation is stripped
    ///
    /// On success the cpf is reduced to its digits; every other field is
    /// kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        for field in Field::ALL {
            require(field, self.get(field))?;
        }

        let email = Email::parse(&self.email)?;
        let cpf = Cpf::parse(&self.cpf)?;

        Ok(NewUser {
            nome: self.nome.clone(),
            email,
            telefone: self.telefone.clone(),
            cep: self.cep.clone(),
            cpf,
        })
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            nome: user.nome.clone(),
            email: user.email.as_str().to_owned(),
            telefone: user.telefone.clone(),
            cep: user.cep.clone(),
            cpf: user.cpf.as_str().to_owned(),
        }
    }
}

/// A validated draft. This is also the wire body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Full name.
    pub nome: String,
    /// Email address.
    pub email: Email,
    /// Phone number.
    pub telefone: String,
    /// Postal code.
    pub cep: String,
    /// National identifier digits.
    pub cpf: Cpf,
}

impl NewUser {
    /// Attach the identifier the store assigned.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            nome: self.nome,
            email: self.email,
            telefone: self.telefone,
            cep: self.cep,
            cpf: self.cpf,
        }
    }
}

/// A partial update. Absent fields are left untouched.
///
/// Unknown keys, including `id`, are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    /// New full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    /// New postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    /// New national identifier, with or without punctuation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
}

impl UserPatch {
    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Nome => self.nome.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Telefone => self.telefone.as_deref(),
            Field::Cep => self.cep.as_deref(),
            Field::Cpf => self.cpf.as_deref(),
        }
    }

    /// Validate the fields that are present, with the same rules and order
    /// as [`UserDraft::validate`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<ValidPatch, ValidationError> {
        for field in Field::ALL {
            if let Some(value) = self.get(field) {
                require(field, value)?;
            }
        }

        let email = self.email.as_deref().map(Email::parse).transpose()?;
        let cpf = self.cpf.as_deref().map(Cpf::parse).transpose()?;

        Ok(ValidPatch {
            nome: self.nome.clone(),
            email,
            telefone: self.telefone.clone(),
            cep: self.cep.clone(),
            cpf,
        })
    }
}

impl From<NewUser> for UserPatch {
    fn from(user: NewUser) -> Self {
        Self {
            nome: Some(user.nome),
            email: Some(user.email.into_inner()),
            telefone: Some(user.telefone),
            cep: Some(user.cep),
            cpf: Some(user.cpf.into_inner()),
        }
    }
}

/// A patch whose present fields passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidPatch {
    /// New full name.
    pub nome: Option<String>,
    /// New email address.
    pub email: Option<Email>,
    /// New phone number.
    pub telefone: Option<String>,
    /// New postal code.
    pub cep: Option<String>,
    /// New national identifier digits.
    pub cpf: Option<Cpf>,
}

impl ValidPatch {
    /// Overwrite the supplied fields of `user`. The id is never touched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(nome) = &self.nome {
            user.nome.clone_from(nome);
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(telefone) = &self.telefone {
            user.telefone.clone_from(telefone);
        }
        if let Some(cep) = &self.cep {
            user.cep.clone_from(cep);
        }
        if let Some(cpf) = &self.cpf {
            user.cpf = cpf.clone();
        }
    }
}
