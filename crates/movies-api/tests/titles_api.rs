//! Catalog CRUD: admin gating, filters, pagination, partial update.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../movies-db/migrations")]
async fn only_admins_can_write_the_catalog(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let user = register_user(&app, "alice").await;
    let admin = seed_admin(&pool, "root").await;

    let body = json!({ "name": "Dune", "type": "movie", "genre": "sci-fi", "year": 2021 });

    let response = post_json_auth(&app, "/titles", &user, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(&app, "/titles", &admin, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json_auth(&app, &format!("/titles/{id}"), &user, json!({ "year": 1999 })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(&app, &format!("/titles/{id}"), &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../movies-db/migrations")]
async fn created_title_is_fetchable_with_type_field(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = seed_admin(&pool, "root").await;

    let response = post_json_auth(
        &app,
        "/titles",
        &admin,
        json!({ "name": "Severance", "type": "series", "genre": "thriller", "year": 2022 }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(&app, &format!("/titles/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let title = body_json(response).await;
    assert_eq!(title["name"], "Severance");
    assert_eq!(title["type"], "series");
    assert_eq!(title["year"], 2022);
}

#[sqlx::test(migrations = "../movies-db/migrations")]
async fn create_validates_name_and_type(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = seed_admin(&pool, "root").await;

    let response =
        post_json_auth(&app, "/titles", &admin, json!({ "name": "", "type": "movie" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        post_json_auth(&app, "/titles", &admin, json!({ "name": "X", "type": "podcast" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../movies-db/migrations")]
async fn listing_filters_and_paginates(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = seed_admin(&pool, "root").await;

    for (name, genre, year) in [
        ("The Godfather", "crime", 1972),
        ("Goodfellas", "crime", 1990),
        ("Alien", "sci-fi", 1979),
    ] {
        let response = post_json_auth(
            &app,
            "/titles",
            &admin,
            json!({ "name": name, "type": "movie", "genre": genre, "year": year }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Case-insensitive substring match on name.
    let response = get_auth(&app, "/titles?name=god", &admin).await;
    let page = body_json(response).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["name"], "The Godfather");

    // Conjunctive filters.
    let response = get_auth(&app, "/titles?genre=crime&year=1990", &admin).await;
    let page = body_json(response).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["name"], "Goodfellas");

    // Pagination counts.
    let response = get_auth(&app, "/titles?per_page=2", &admin).await;
    let page = body_json(response).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["total"], 3);
    assert_eq!(page["pages"], 2);

    // Out-of-range page: empty items, counts intact.
    let response = get_auth(&app, "/titles?page=9&per_page=2", &admin).await;
    let page = body_json(response).await;
    assert!(page["items"].as_array().unwrap().is_empty());
    assert_eq!(page["total"], 3);
    assert_eq!(page["pages"], 2);
}

#[sqlx::test(migrations = "../movies-db/migrations")]
async fn update_is_partial(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = seed_admin(&pool, "root").await;

    let response = post_json_auth(
        &app,
        "/titles",
        &admin,
        json!({ "name": "Arrival", "type": "movie", "genre": "drama", "year": 2016 }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response =
        put_json_auth(&app, &format!("/titles/{id}"), &admin, json!({ "genre": "sci-fi" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let title = body_json(response).await;
    assert_eq!(title["name"], "Arrival");
    assert_eq!(title["genre"], "sci-fi");
    assert_eq!(title["year"], 2016);
}

#[sqlx::test(migrations = "../movies-db/migrations")]
async fn delete_returns_204_then_404(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let admin = seed_admin(&pool, "root").await;

    let response = post_json_auth(
        &app,
        "/titles",
        &admin,
        json!({ "name": "Heat", "type": "movie" }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(&app, &format!("/titles/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app, &format!("/titles/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(&app, &format!("/titles/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
