//! HTTP response envelope.
//!
//! Every endpoint answers with the same wrapper:
//! `{success, statusCode, message, data, error?}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use perimeter_core::error::PerimeterError;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(status: StatusCode, message: &str, data: T) -> HttpResponse {
        HttpResponseBuilder::new(status).json(ApiResponse {
            success: true,
            status_code: status.as_u16(),
            message: message.to_string(),
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    pub fn fail(status: StatusCode, message: &str, error: String) -> HttpResponse {
        HttpResponseBuilder::new(status).json(ApiResponse::<()> {
            success: false,
            status_code: status.as_u16(),
            message: message.to_string(),
            data: None,
            error: Some(error),
        })
    }
}

/// Status class for each domain error.
///
/// Validation and duplicate failures are client errors; a missing id
/// maps to 404 rather than the catch-all 400.
pub fn status_for(err: &PerimeterError) -> StatusCode {
    match err {
        PerimeterError::Validation { .. } | PerimeterError::Duplicate { .. } => {
            StatusCode::BAD_REQUEST
        }
        PerimeterError::NotFound { .. } => StatusCode::NOT_FOUND,
        PerimeterError::Database(_) | PerimeterError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
