//! Domain error shared by every layer above `vagas-core`.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        CoreError::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        CoreError::Conflict(msg.into())
    }
}

/// Lift a plain validator result (`Err(message)`) into [`CoreError::Validation`].
///
/// The field validators in this crate return `Result<(), String>` so they can
/// also back `#[validate(custom(...))]` attributes; handlers use this to feed
/// them into `?`.
pub fn validation(result: Result<(), String>) -> Result<(), CoreError> {
    result.map_err(CoreError::Validation)
}
