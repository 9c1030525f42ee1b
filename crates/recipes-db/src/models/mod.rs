pub mod ingredient;
pub mod recipe;
pub mod user;
pub mod user_recipe;
