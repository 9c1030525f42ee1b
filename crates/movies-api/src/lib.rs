//! HTTP layer of the movie/TV tracking service.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod tmdb;
