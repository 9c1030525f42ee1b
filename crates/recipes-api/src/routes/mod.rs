pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, ingredients, profile, recipes, user_recipes};
use crate::state::AppState;

/// All application routes except `/health`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(profile::get_profile))
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route(
            "/ingredients/{id}",
            get(ingredients::get_ingredient)
                .put(ingredients::update_ingredient)
                .delete(ingredients::delete_ingredient),
        )
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route("/recipes/find-by-ingredients", post(recipes::find_by_ingredients))
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route(
            "/user-recipes",
            get(user_recipes::list_tracked).post(user_recipes::track_recipe),
        )
        .route(
            "/user-recipes/{recipe_id}",
            get(user_recipes::get_tracked)
                .put(user_recipes::update_tracked)
                .delete(user_recipes::delete_tracked),
        )
}
