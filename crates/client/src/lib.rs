//! User Registry Client - the form/list front end of the registry.
//!
//! # Modules
//!
//! - [`api`] - `UsersApi` trait and its `reqwest` implementation
//! - [`form`] - Draft state and the create/edit mode switch
//! - [`page`] - The page controller: validation, API calls, list sync, banner
//! - [`messages`] - User-facing (pt-BR) banner texts
//! - [`render`] - Text rendering of the page
//!
//! # Flow
//!
//! ```text
//! validate draft ──▶ UsersApi call ──▶ success: refetch list (create/update)
//!        │                  │                   or drop id locally (delete)
//!        ▼                  ▼
//!   error banner ◀──── any failure
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod form;
pub mod messages;
pub mod page;
pub mod render;

pub use api::{ApiError, HttpUsersApi, UsersApi};
pub use form::{FormMode, UserForm};
pub use page::UsersPage;
pub use render::render_page;
