//! Banner texts shown to the person filling in the form.

use user_registry_core::{Field, ValidationError};

use crate::api::ApiError;

/// Page title.
pub const TITLE: &str = "Cadastro de Usuários";

/// Shown when the email is not `local@domain.tld`.
pub const INVALID_EMAIL: &str = "E-mail inválido.";

/// Shown when the cpf does not have 11 digits.
pub const INVALID_CPF: &str = "CPF deve conter 11 dígitos.";

/// Shown when the email or cpf is already registered.
pub const DUPLICATE_USER: &str = "Já existe um usuário com este CPF ou e-mail.";

/// Generic create failure.
pub const CREATE_FAILED: &str = "Erro ao cadastrar usuário.";
/// Generic update failure.
pub const UPDATE_FAILED: &str = "Erro ao salvar alterações.";
/// Generic delete failure.
pub const DELETE_FAILED: &str = "Erro ao excluir usuário.";
/// The list could not be fetched.
pub const LOAD_FAILED: &str = "Erro ao carregar usuários.";

/// Shown when an action names a user the server (or the list) no longer has.
pub const USER_NOT_FOUND: &str = "Usuário não encontrado.";

/// Banner for a failed pre-submission check.
#[must_use]
pub fn validation(err: &ValidationError) -> String {
    match err {
        ValidationError::Required(field) => required(*field),
        ValidationError::InvalidEmail(_) => INVALID_EMAIL.to_owned(),
        ValidationError::InvalidCpf(_) => INVALID_CPF.to_owned(),
    }
}

/// Banner for an empty required field.
#[must_use]
pub fn required(field: Field) -> String {
    format!("O campo \"{field}\" é obrigatório.")
}

/// Banner for a failed API call.
///
/// `fallback` is the generic text for the action that failed.
#[must_use]
pub fn api(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Conflict(_) => DUPLICATE_USER.to_owned(),
        err if err.is_not_found() => USER_NOT_FOUND.to_owned(),
        _ => fallback.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use user_registry_core::{Cpf, Email};

    use super::*;

    #[test]
    fn test_required_names_field() {
        assert_eq!(required(Field::Telefone), "O campo \"telefone\" é obrigatório.");
    }

    #[test]
    fn test_validation_messages() {
        let email = ValidationError::from(Email::parse("nope").unwrap_err());
        assert_eq!(validation(&email), INVALID_EMAIL);

        let cpf = ValidationError::from(Cpf::parse("123").unwrap_err());
        assert_eq!(validation(&cpf), INVALID_CPF);

        assert_eq!(
            validation(&ValidationError::Required(Field::Nome)),
            "O campo \"nome\" é obrigatório."
        );
    }

    #[test]
    fn test_api_messages() {
        let conflict = ApiError::Conflict("duplicate email or identifier".to_owned());
        assert_eq!(api(&conflict, CREATE_FAILED), DUPLICATE_USER);

        let missing = ApiError::Status {
            status: 404,
            message: "user not found".to_owned(),
        };
        assert_eq!(api(&missing, DELETE_FAILED), USER_NOT_FOUND);

        let internal = ApiError::Status {
            status: 500,
            message: "internal error".to_owned(),
        };
        assert_eq!(api(&internal, UPDATE_FAILED), UPDATE_FAILED);
    }
}
