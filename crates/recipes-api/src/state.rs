use std::sync::Arc;

use axum::extract::FromRef;
use recipes_db::DbPool;
use tracker_core::auth::jwt::JwtConfig;

use crate::config::ServerConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

// Lets the shared auth extractors pull the JWT config out of this state.
impl FromRef<AppState> for JwtConfig {
    fn from_ref(state: &AppState) -> JwtConfig {
        state.config.jwt.clone()
    }
}
