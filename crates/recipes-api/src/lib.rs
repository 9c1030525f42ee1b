//! HTTP layer of the recipe management service.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;
