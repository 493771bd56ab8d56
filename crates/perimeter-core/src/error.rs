//! Error types for the Perimeter system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerimeterError {
    #[error("geofence with id {id} not found")]
    NotFound { id: String },

    #[error("{message}")]
    Duplicate { message: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl PerimeterError {
    /// The uniqueness-violation error with its standard message, shared
    /// by the pre-insert duplicate guard and the store-constraint
    /// mapping so both report identically.
    pub fn duplicate() -> Self {
        Self::Duplicate {
            message: "a geofence with the same name or coordinates already exists".into(),
        }
    }
}

pub type PerimeterResult<T> = Result<T, PerimeterError>;
