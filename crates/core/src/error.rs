use crate::types::DbId;

/// Domain-level failure taxonomy shared by both services.
///
/// Each variant corresponds to exactly one HTTP status; the mapping lives in
/// `tracker-web` so this crate stays transport-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row with the given id. Maps to 404.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or out-of-range input. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// A natural-key uniqueness rule was violated. Maps to 409.
    #[error("{0}")]
    Conflict(String),

    /// Missing, invalid, or expired credentials. Maps to 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the caller's role or ownership does not permit
    /// this operation. Maps to 403.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected failure; the message is logged server-side and never
    /// shown to the caller. Maps to 500.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        CoreError::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        CoreError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        CoreError::Forbidden(msg.into())
    }
}
