//! Model structs and DTOs for the tracking schema.
//!
//! Each submodule carries:
//! - a `FromRow` + `Serialize` entity struct matching the database row
//! - a create/upsert DTO for inserts
//! - an all-`Option` update DTO where partial updates apply

pub mod list_entry;
pub mod rating;
pub mod review;
pub mod title;
pub mod user;
