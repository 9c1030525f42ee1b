//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! take `&PgPool` as the first argument. Multi-row writes (recipe plus its
//! ingredient lines) run in a transaction; the (user, recipe) tracking
//! upsert is a single atomic statement.

pub mod ingredient_repo;
pub mod recipe_repo;
pub mod user_recipe_repo;
pub mod user_repo;

pub use ingredient_repo::IngredientRepo;
pub use recipe_repo::RecipeRepo;
pub use user_recipe_repo::UserRecipeRepo;
pub use user_repo::UserRepo;
