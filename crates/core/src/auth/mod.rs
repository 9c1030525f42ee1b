//! Credential and token primitives.
//!
//! - [`password`] -- Argon2id hashing/verification and strength checks.
//! - [`jwt`] -- HS256 access-token generation and validation.

pub mod jwt;
pub mod password;
