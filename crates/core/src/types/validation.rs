//! Field names and validation errors shared by client and server.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{CpfError, EmailError};

/// One of the five editable user attributes.
///
/// Displays as its wire (JSON) name, which is also the name reported when a
/// required field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Full name.
    Nome,
    /// Email address.
    Email,
    /// Phone number.
    Telefone,
    /// Postal code.
    Cep,
    /// National identifier.
    Cpf,
}

impl Field {
    /// All fields, in form order. Required-field checks run in this order.
    pub const ALL: [Self; 5] = [Self::Nome, Self::Email, Self::Telefone, Self::Cep, Self::Cpf];

    /// The wire name of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nome => "nome",
            Self::Email => "email",
            Self::Telefone => "telefone",
            Self::Cep => "cep",
            Self::Cpf => "cpf",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a draft or patch was rejected before reaching the datastore.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field is empty or whitespace-only.
    #[error("field \"{0}\" is required")]
    Required(Field),

    /// The email is not shaped like `local@domain.tld`.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The national identifier does not have 11 digits.
    #[error("invalid cpf: {0}")]
    InvalidCpf(#[from] CpfError),
}

impl ValidationError {
    /// The field this error refers to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Required(field) => *field,
            Self::InvalidEmail(_) => Field::Email,
            Self::InvalidCpf(_) => Field::Cpf,
        }
    }
}

/// Fail with [`ValidationError::Required`] if `value` is blank.
pub(crate) fn require(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}
