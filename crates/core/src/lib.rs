//! User Registry Core - Shared types library.
//!
//! This crate provides the types shared by every user registry component:
//! - `server` - HTTP API over the `users` table
//! - `client` - Form state, validation, and list sync against the API
//! - `cli` - Command-line tools for migrations, seeding, and user management
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. Validation lives here so that the client's
//! pre-submission checks and the server's write-path checks are the same code.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, national identifiers, and
//!   the user entity with its draft and patch forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
