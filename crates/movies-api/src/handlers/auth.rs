//! Registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use movies_db::models::user::CreateUser;
use movies_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use tracker_core::auth::jwt::issue_token;
use tracker_core::auth::password::{check_password_strength, hash_password, verify_password};
use tracker_core::error::CoreError;
use tracker_core::roles::ROLE_USER;
use tracker_web::AppResult;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /register`. New accounts always get the `user` role; admins are
/// seeded from the environment at startup.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(CoreError::validation("Username must not be empty").into());
    }
    check_password_strength(&body.password)?;

    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(CoreError::conflict("Username already taken").into());
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hash_password(&body.password)?,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user registered");

    let token = issue_token(user.id, &user.role, &state.config.jwt)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// `POST /login`. Unknown usernames and wrong passwords are
/// indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || CoreError::unauthorized("Invalid username or password");

    let user = UserRepo::find_by_username(&state.pool, body.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(invalid().into());
    }

    let token = issue_token(user.id, &user.role, &state.config.jwt)?;
    Ok(Json(TokenResponse { token }))
}
