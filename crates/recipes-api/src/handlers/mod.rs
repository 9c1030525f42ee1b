pub mod auth;
pub mod ingredients;
pub mod profile;
pub mod recipes;
pub mod user_recipes;
