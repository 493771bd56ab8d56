//! Geofence domain model.
//!
//! A geofence is a named geographic boundary record tied to a client
//! account. Geometry data is stored verbatim; no geometric computation
//! happens anywhere in this workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address block attached to a geofence. All subfields are
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub zip_code: String,
    pub country: String,
    pub state: String,
    pub area: String,
    pub city: String,
    pub district: String,
}

/// Geometry payload.
///
/// `coordinates` is the dedup key for duplicate detection; its contents
/// are otherwise opaque to this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<f64>,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCodeData {
    #[serde(rename = "type")]
    pub code_type: String,
    pub geometry: Geometry,
}

/// A persisted geofence record.
///
/// `name` and `geo_code_data.geometry.coordinates` are unique across all
/// records; both are checked before insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub id: Uuid,
    /// Client account the geofence belongs to.
    pub client_id: String,
    /// Display name, unique across all records.
    pub name: String,
    pub mobile_number: i64,
    pub address: Address,
    /// Free-form resolved address line.
    pub final_address: String,
    /// Optional category label (e.g. `warehouse`); searchable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    pub geo_code_data: GeoCodeData,
    /// Record author identifier, immutable after creation.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new geofence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeofence {
    pub client_id: String,
    pub name: String,
    pub mobile_number: i64,
    pub address: Address,
    pub final_address: String,
    #[serde(default)]
    pub location_type: Option<String>,
    pub geo_code_data: GeoCodeData,
    pub created_by: String,
}

/// Fields that can be updated on an existing geofence.
///
/// A partial overwrite of mutable fields only: `id`, `created_at` and
/// `created_by` are never touched by an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGeofence {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub mobile_number: Option<i64>,
    pub address: Option<Address>,
    pub final_address: Option<String>,
    pub location_type: Option<String>,
    pub geo_code_data: Option<GeoCodeData>,
}
