pub mod admin;
pub mod auth;
pub mod lists;
pub mod ratings;
pub mod reviews;
pub mod titles;
