//! Core types for the user registry.
//!
//! This module provides type-safe wrappers for the registry's domain concepts.

pub mod cpf;
pub mod email;
pub mod id;
pub mod user;
pub mod validation;

pub use cpf::{Cpf, CpfError};
pub use email::{Email, EmailError};
pub use id::*;
pub use user::{NewUser, User, UserDraft, UserPatch, ValidPatch};
pub use validation::{Field, ValidationError};
