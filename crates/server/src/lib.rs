//! User Registry Server library.
//!
//! The server's modules live here so they can be tested and reused; the
//! `user-registry-server` binary only wires configuration, logging, and the
//! `PostgreSQL` store together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
