//! SurrealDB implementation of [`GeofenceRepository`].
//!
//! Record ids are v4 UUIDs stored as strings inside SurrealDB record
//! ids (`geofence:<uuid>`); scans recover them via `meta::id(id)`.
//! Timestamps are maintained by the store (`DEFAULT time::now()` at
//! insert, explicit `time::now()` on update).

use chrono::{DateTime, Utc};
use perimeter_core::error::PerimeterResult;
use perimeter_core::models::geofence::{
    Address, CreateGeofence, GeoCodeData, Geofence, Geometry, UpdateGeofence,
};
use perimeter_core::repository::{GeofenceRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Predicate shared by the search page and search count queries so
/// `total` is always computed under the same filter as the page.
/// `string::contains(_, '')` is true, so an empty needle matches all.
const SEARCH_PREDICATE: &str = "string::contains(string::lowercase(name), $needle) \
     OR string::contains(string::lowercase(location_type ?? ''), $needle) \
     OR string::contains(string::lowercase(address.city), $needle) \
     OR string::contains(string::lowercase(address.state), $needle)";

#[derive(Debug, Clone, SurrealValue)]
struct AddressRow {
    zip_code: String,
    country: String,
    state: String,
    area: String,
    city: String,
    district: String,
}

impl From<Address> for AddressRow {
    fn from(a: Address) -> Self {
        Self {
            zip_code: a.zip_code,
            country: a.country,
            state: a.state,
            area: a.area,
            city: a.city,
            district: a.district,
        }
    }
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            zip_code: row.zip_code,
            country: row.country,
            state: row.state,
            area: row.area,
            city: row.city,
            district: row.district,
        }
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct GeometryRow {
    r#type: String,
    coordinates: Vec<f64>,
    radius: f64,
}

#[derive(Debug, Clone, SurrealValue)]
struct GeoCodeDataRow {
    r#type: String,
    geometry: GeometryRow,
}

impl From<GeoCodeData> for GeoCodeDataRow {
    fn from(g: GeoCodeData) -> Self {
        Self {
            r#type: g.code_type,
            geometry: GeometryRow {
                r#type: g.geometry.geometry_type,
                coordinates: g.geometry.coordinates,
                radius: g.geometry.radius,
            },
        }
    }
}

impl From<GeoCodeDataRow> for GeoCodeData {
    fn from(row: GeoCodeDataRow) -> Self {
        Self {
            code_type: row.r#type,
            geometry: Geometry {
                geometry_type: row.geometry.r#type,
                coordinates: row.geometry.coordinates,
                radius: row.geometry.radius,
            },
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct GeofenceRow {
    client_id: String,
    name: String,
    mobile_number: i64,
    address: AddressRow,
    final_address: String,
    location_type: Option<String>,
    geo_code_data: GeoCodeDataRow,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GeofenceRow {
    fn into_geofence(self, id: Uuid) -> Geofence {
        Geofence {
            id,
            client_id: self.client_id,
            name: self.name,
            mobile_number: self.mobile_number,
            address: self.address.into(),
            final_address: self.final_address,
            location_type: self.location_type,
            geo_code_data: self.geo_code_data.into(),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct GeofenceRowWithId {
    record_id: String,
    client_id: String,
    name: String,
    mobile_number: i64,
    address: AddressRow,
    final_address: String,
    location_type: Option<String>,
    geo_code_data: GeoCodeDataRow,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GeofenceRowWithId {
    fn try_into_geofence(self) -> Result<Geofence, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        Ok(Geofence {
            id,
            client_id: self.client_id,
            name: self.name,
            mobile_number: self.mobile_number,
            address: self.address.into(),
            final_address: self.final_address,
            location_type: self.location_type,
            geo_code_data: self.geo_code_data.into(),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Classify a failed statement: a unique-index violation becomes
/// [`DbError::Conflict`] so it surfaces as a duplicate, not a generic
/// database fault.
fn classify_check_error(err: surrealdb::Error) -> DbError {
    let message = err.to_string();
    if message.contains("already contains") {
        DbError::Conflict(message)
    } else {
        DbError::Query(message)
    }
}

/// SurrealDB implementation of the Geofence repository.
#[derive(Clone)]
pub struct SurrealGeofenceRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealGeofenceRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> GeofenceRepository for SurrealGeofenceRepository<C> {
    async fn create(&self, input: CreateGeofence) -> PerimeterResult<Geofence> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('geofence', $id) SET \
                 client_id = $client_id, \
                 name = $name, \
                 mobile_number = $mobile_number, \
                 address = $address, \
                 final_address = $final_address, \
                 location_type = $location_type, \
                 geo_code_data = $geo_code_data, \
                 created_by = $created_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("client_id", input.client_id))
            .bind(("name", input.name))
            .bind(("mobile_number", input.mobile_number))
            .bind(("address", AddressRow::from(input.address)))
            .bind(("final_address", input.final_address))
            .bind(("location_type", input.location_type))
            .bind(("geo_code_data", GeoCodeDataRow::from(input.geo_code_data)))
            .bind(("created_by", input.created_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(classify_check_error)?;

        let rows: Vec<GeofenceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            id: id_str,
        })?;

        Ok(row.into_geofence(id))
    }

    async fn get_by_id(&self, id: Uuid) -> PerimeterResult<Geofence> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('geofence', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GeofenceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            id: id_str,
        })?;

        Ok(row.into_geofence(id))
    }

    async fn find_duplicate(
        &self,
        name: &str,
        coordinates: &[f64],
    ) -> PerimeterResult<Option<Geofence>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM geofence \
                 WHERE name = $name \
                 OR geo_code_data.geometry.coordinates = $coordinates",
            )
            .bind(("name", name.to_string()))
            .bind(("coordinates", coordinates.to_vec()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GeofenceRowWithId> = result.take(0).map_err(DbError::from)?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_geofence()?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, input: UpdateGeofence) -> PerimeterResult<Geofence> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.client_id.is_some() {
            sets.push("client_id = $client_id");
        }
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.mobile_number.is_some() {
            sets.push("mobile_number = $mobile_number");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        if input.final_address.is_some() {
            sets.push("final_address = $final_address");
        }
        if input.location_type.is_some() {
            sets.push("location_type = $location_type");
        }
        if input.geo_code_data.is_some() {
            sets.push("geo_code_data = $geo_code_data");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('geofence', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(client_id) = input.client_id {
            builder = builder.bind(("client_id", client_id));
        }
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(mobile_number) = input.mobile_number {
            builder = builder.bind(("mobile_number", mobile_number));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", AddressRow::from(address)));
        }
        if let Some(final_address) = input.final_address {
            builder = builder.bind(("final_address", final_address));
        }
        if let Some(location_type) = input.location_type {
            builder = builder.bind(("location_type", location_type));
        }
        if let Some(geo_code_data) = input.geo_code_data {
            builder = builder.bind(("geo_code_data", GeoCodeDataRow::from(geo_code_data)));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(classify_check_error)?;

        let rows: Vec<GeofenceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            id: id_str,
        })?;

        Ok(row.into_geofence(id))
    }

    async fn delete(&self, id: Uuid) -> PerimeterResult<()> {
        let id_str = id.to_string();

        // RETURN BEFORE distinguishes a removed record from a missing id.
        let mut result = self
            .db
            .query("DELETE type::record('geofence', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GeofenceRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound { id: id_str }.into());
        }

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> PerimeterResult<PaginatedResult<Geofence>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM geofence GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM geofence \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GeofenceRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_geofence())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn search(
        &self,
        search_text: &str,
        pagination: Pagination,
    ) -> PerimeterResult<PaginatedResult<Geofence>> {
        let needle = search_text.to_lowercase();

        let count_query =
            format!("SELECT count() AS total FROM geofence WHERE {SEARCH_PREDICATE} GROUP ALL");
        let mut count_result = self
            .db
            .query(&count_query)
            .bind(("needle", needle.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let page_query = format!(
            "SELECT meta::id(id) AS record_id, * \
             FROM geofence WHERE {SEARCH_PREDICATE} \
             ORDER BY created_at ASC \
             LIMIT $limit START $offset"
        );
        let mut result = self
            .db
            .query(&page_query)
            .bind(("needle", needle))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GeofenceRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_geofence())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
