//! Well-known role names.
//!
//! Stored verbatim in the `role` column of each service's `users` table and
//! embedded in JWT claims. Registration always assigns [`ROLE_USER`];
//! admins are seeded at startup.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
