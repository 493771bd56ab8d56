//! Structural validation of inbound geofence payloads.
//!
//! Pure functions of the payload: no store access, no semantic checks
//! (the `type` discriminators are not matched against a vocabulary and
//! `radius` is not bound-checked). The first violating field fails the
//! whole payload.

use perimeter_core::error::{PerimeterError, PerimeterResult};
use perimeter_core::models::geofence::{Address, CreateGeofence, GeoCodeData, UpdateGeofence};

fn require(field: &'static str, value: &str) -> PerimeterResult<()> {
    if value.trim().is_empty() {
        return Err(PerimeterError::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(())
}

fn check_address(address: &Address) -> PerimeterResult<()> {
    require("address.zipCode", &address.zip_code)?;
    require("address.country", &address.country)?;
    require("address.state", &address.state)?;
    require("address.area", &address.area)?;
    require("address.city", &address.city)?;
    require("address.district", &address.district)
}

fn check_geo_code_data(geo: &GeoCodeData) -> PerimeterResult<()> {
    require("geoCodeData.type", &geo.code_type)?;
    require("geoCodeData.geometry.type", &geo.geometry.geometry_type)?;
    if geo.geometry.coordinates.is_empty() {
        return Err(PerimeterError::Validation {
            message: "geoCodeData.geometry.coordinates is required".into(),
        });
    }
    Ok(())
}

/// Validate a create payload: every required field present and
/// non-empty, nested address and geometry fully shaped.
pub fn validate_create(input: &CreateGeofence) -> PerimeterResult<()> {
    require("clientId", &input.client_id)?;
    require("name", &input.name)?;
    check_address(&input.address)?;
    require("finalAddress", &input.final_address)?;
    check_geo_code_data(&input.geo_code_data)?;
    require("createdBy", &input.created_by)
}

/// Validate a partial update payload: the same checks, applied only to
/// fields that are present.
pub fn validate_update(input: &UpdateGeofence) -> PerimeterResult<()> {
    if let Some(client_id) = &input.client_id {
        require("clientId", client_id)?;
    }
    if let Some(name) = &input.name {
        require("name", name)?;
    }
    if let Some(address) = &input.address {
        check_address(address)?;
    }
    if let Some(final_address) = &input.final_address {
        require("finalAddress", final_address)?;
    }
    if let Some(geo) = &input.geo_code_data {
        check_geo_code_data(geo)?;
    }
    Ok(())
}
