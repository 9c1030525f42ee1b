//! Bearer-token authentication extractors.
//!
//! Generic over the application state: any state that can lend a
//! [`JwtConfig`] via [`FromRef`] gets these extractors for free, so both
//! services share one implementation.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use tracker_core::auth::jwt::{verify_token, JwtConfig};
use tracker_core::error::CoreError;
use tracker_core::roles::ROLE_ADMIN;
use tracker_core::types::DbId;

use crate::error::AppError;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// Use as a handler parameter on every route that requires a valid token:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<...>> {
///     tracing::debug!(user_id = user.user_id, "handling");
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Database id from the token's `sub` claim.
    pub user_id: DbId,
    /// Role name from the token's `role` claim.
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::unauthorized("Missing Authorization header"))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>",
            ))
        })?;

        let config = JwtConfig::from_ref(state);
        let claims = verify_token(token, &config)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Requires the `admin` role; rejects other callers with 403.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<...> {
///     // admin.role == "admin" is guaranteed here
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::forbidden("Admin role required")));
        }
        Ok(RequireAdmin(user))
    }
}
