//! Registration and login.

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use recipes_db::models::user::CreateUser;
use recipes_db::repositories::UserRepo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracker_core::auth::jwt::issue_token;
use tracker_core::auth::password::{check_password_strength, hash_password, verify_password};
use tracker_core::error::CoreError;
use tracker_core::roles::ROLE_USER;
use tracker_web::AppResult;

use crate::state::AppState;

// Loose shape check; real validation happens when mail is delivered.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /register`. New accounts always get the `user` role; the caller
/// cannot choose one. Admins are seeded from the environment at startup.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let email = body.email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(CoreError::validation("Invalid email address").into());
    }
    if body.name.trim().is_empty() {
        return Err(CoreError::validation("Name must not be empty").into());
    }
    check_password_strength(&body.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::conflict("Email already registered").into());
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            name: body.name.trim().to_string(),
            password_hash: hash_password(&body.password)?,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user registered");

    let token = issue_token(user.id, &user.role, &state.config.jwt)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// `POST /login`. Unknown emails and wrong passwords are indistinguishable
/// to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || CoreError::unauthorized("Invalid email or password");

    let user = UserRepo::find_by_email(&state.pool, &body.email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(invalid().into());
    }

    let token = issue_token(user.id, &user.role, &state.config.jwt)?;
    Ok(Json(TokenResponse { token }))
}
