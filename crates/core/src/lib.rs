//! Shared domain plumbing for both tracking services.
//!
//! Nothing in this crate knows about HTTP or the database driver; it holds
//! the error taxonomy, id/timestamp aliases, role names, the pagination
//! contract, and the password/token primitives the API crates build on.

pub mod auth;
pub mod error;
pub mod page;
pub mod roles;
pub mod types;
