//! Geofence HTTP handlers.
//!
//! Thin routing and envelope wrapping over the domain service. Query
//! parameters arrive loosely typed and are coerced by
//! [`perimeter_service::params`]; bodies are deserialized into the
//! domain payload types.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use perimeter_core::models::geofence::{CreateGeofence, Geofence, UpdateGeofence};
use perimeter_core::repository::PaginatedResult;
use perimeter_db::DbManager;
use perimeter_service::params;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::AppService;
use crate::response::{ApiResponse, status_for};

/// Page shape returned by list and search.
#[derive(Debug, Serialize)]
pub struct PageData {
    pub data: Vec<Geofence>,
    pub total: u64,
}

impl From<PaginatedResult<Geofence>> for PageData {
    fn from(page: PaginatedResult<Geofence>) -> Self {
        Self {
            data: page.items,
            total: page.total,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiResponse::fail(
            StatusCode::BAD_REQUEST,
            "Invalid geofence id",
            format!("'{raw}' is not a valid geofence id"),
        )
    })
}

#[post("/geofences")]
pub async fn create(
    service: web::Data<AppService>,
    body: web::Json<CreateGeofence>,
) -> impl Responder {
    match service.create(body.into_inner()).await {
        Ok(geofence) => ApiResponse::ok(
            StatusCode::CREATED,
            "Geofence created successfully",
            geofence,
        ),
        Err(err) => {
            warn!(error = %err, "create geofence failed");
            ApiResponse::fail(status_for(&err), "Failed to create geofence", err.to_string())
        }
    }
}

#[get("/geofences")]
pub async fn list(
    service: web::Data<AppService>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let page = params::parse_page(query.get("page").map(String::as_str));
    let limit = params::parse_limit(query.get("limit").map(String::as_str));

    match service.list(page, limit).await {
        Ok(result) => ApiResponse::ok(
            StatusCode::OK,
            "Geofences retrieved successfully",
            PageData::from(result),
        ),
        Err(err) => {
            warn!(error = %err, "list geofences failed");
            ApiResponse::fail(
                status_for(&err),
                "Failed to retrieve geofences",
                err.to_string(),
            )
        }
    }
}

// Registered before the `{id}` route so `search` is not captured as an id.
#[get("/geofences/search")]
pub async fn search(
    service: web::Data<AppService>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let page = params::parse_page(query.get("page").map(String::as_str));
    let limit = params::parse_limit(query.get("limit").map(String::as_str));
    let search_text = params::parse_search_text(query.get("searchText").map(String::as_str));

    match service.search(page, limit, &search_text).await {
        Ok(result) => ApiResponse::ok(
            StatusCode::OK,
            "Search results retrieved successfully",
            PageData::from(result),
        ),
        Err(err) => {
            warn!(error = %err, "search geofences failed");
            ApiResponse::fail(
                status_for(&err),
                "Failed to search geofences",
                err.to_string(),
            )
        }
    }
}

#[get("/geofences/{id}")]
pub async fn get_by_id(service: web::Data<AppService>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.get(id).await {
        Ok(geofence) => ApiResponse::ok(
            StatusCode::OK,
            &format!("Geofence with ID {id} retrieved"),
            geofence,
        ),
        Err(err) => {
            warn!(%id, error = %err, "get geofence failed");
            ApiResponse::fail(status_for(&err), "Failed to get geofence", err.to_string())
        }
    }
}

#[put("/geofences/{id}")]
pub async fn update(
    service: web::Data<AppService>,
    path: web::Path<String>,
    body: web::Json<UpdateGeofence>,
) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.update(id, body.into_inner()).await {
        Ok(geofence) => ApiResponse::ok(
            StatusCode::OK,
            &format!("Geofence with ID {id} updated successfully"),
            geofence,
        ),
        Err(err) => {
            warn!(%id, error = %err, "update geofence failed");
            ApiResponse::fail(
                status_for(&err),
                "Failed to update geofence",
                err.to_string(),
            )
        }
    }
}

#[delete("/geofences/{id}")]
pub async fn remove(service: web::Data<AppService>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.delete(id).await {
        Ok(()) => ApiResponse::ok(
            StatusCode::OK,
            &format!("Geofence with ID {id} deleted successfully"),
            (),
        ),
        Err(err) => {
            warn!(%id, error = %err, "delete geofence failed");
            ApiResponse::fail(
                status_for(&err),
                "Failed to delete geofence",
                err.to_string(),
            )
        }
    }
}

#[get("/health")]
pub async fn health(manager: web::Data<DbManager>) -> impl Responder {
    match manager.health().await {
        Ok(()) => ApiResponse::ok(StatusCode::OK, "OK", ()),
        Err(err) => ApiResponse::fail(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database unreachable",
            err.to_string(),
        ),
    }
}
