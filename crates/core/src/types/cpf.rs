//! National identifier (CPF) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cpf`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfError {
    /// The input does not contain exactly 11 digits.
    #[error("cpf must contain exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digits found after stripping punctuation.
        actual: usize,
    },
}

/// A national identifier, stored as its 11 digits with no punctuation.
///
/// Formatting characters are stripped on parse, so `123.456.789-09` and
/// `12345678909` are the same identifier. Check digits are not verified.
///
/// ## Examples
///
/// ```
/// use user_registry_core::Cpf;
///
/// let cpf = Cpf::parse("123.456.789-09").unwrap();
/// assert_eq!(cpf.as_str(), "12345678909");
///
/// assert!(Cpf::parse("1234567890").is_err()); // 10 digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Number of digits in a CPF.
    pub const DIGITS: usize = 11;

    /// Parse a `Cpf`, discarding every non-digit character.
    ///
    /// # Errors
    ///
    /// Returns [`CpfError::WrongLength`] unless exactly 11 digits remain.
    pub fn parse(s: &str) -> Result<Self, CpfError> {
        let digits = strip_non_digits(s);

        if digits.len() != Self::DIGITS {
            return Err(CpfError::WrongLength {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cpf` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Keep only the ASCII digits of `s`.
#[must_use]
pub fn strip_non_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cpf {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cpf {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cpf {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_and_bare_digits_are_equal() {
        let formatted = Cpf::parse("123.456.789-09").unwrap();
        let bare = Cpf::parse("12345678909").unwrap();
        assert_eq!(formatted, bare);
        assert_eq!(formatted.as_str(), "12345678909");
    }

    #[test]
    fn test_ten_digits_rejected() {
        assert_eq!(
            Cpf::parse("1234567890"),
            Err(CpfError::WrongLength {
                expected: 11,
                actual: 10
            })
        );
    }

    #[test]
    fn test_twelve_digits_rejected() {
        assert!(Cpf::parse("123456789012").is_err());
    }

    #[test]
    fn test_letters_are_stripped_not_counted() {
        assert!(Cpf::parse("abc12345678909xyz").is_ok());
        assert!(Cpf::parse("abcdefghijk").is_err());
    }

    #[test]
    fn test_strip_non_digits() {
        assert_eq!(strip_non_digits(" 1a2-3.4 "), "1234");
        assert_eq!(strip_non_digits(""), "");
    }
}
