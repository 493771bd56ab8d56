//! Database-specific error types and conversions.

use perimeter_core::error::PerimeterError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("geofence not found: {id}")]
    NotFound { id: String },

    #[error("uniqueness violation: {0}")]
    Conflict(String),
}

impl From<DbError> for PerimeterError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id } => PerimeterError::NotFound { id },
            DbError::Conflict(_) => PerimeterError::duplicate(),
            other => PerimeterError::Database(other.to_string()),
        }
    }
}
