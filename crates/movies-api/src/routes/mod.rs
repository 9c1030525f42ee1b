pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{admin, auth, lists, ratings, reviews, titles};
use crate::state::AppState;

/// All application routes except `/health`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/titles", get(titles::list_titles).post(titles::create_title))
        .route(
            "/titles/{id}",
            get(titles::get_title)
                .put(titles::update_title)
                .delete(titles::delete_title),
        )
        .route("/lists", get(lists::list_entries).post(lists::upsert_entry))
        .route("/lists/{id}", delete(lists::delete_entry))
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::upsert_review),
        )
        .route("/reviews/{id}", delete(reviews::delete_review))
        .route(
            "/ratings",
            get(ratings::list_ratings).post(ratings::upsert_rating),
        )
        .route("/ratings/{id}", delete(ratings::delete_rating))
        .route("/admin/load_movies", post(admin::load_movies))
}
