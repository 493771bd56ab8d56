//! Geofence domain service — orchestration over the repository port.

use perimeter_core::error::{PerimeterError, PerimeterResult};
use perimeter_core::models::geofence::{CreateGeofence, Geofence, UpdateGeofence};
use perimeter_core::repository::{GeofenceRepository, PaginatedResult, Pagination};
use tracing::debug;
use uuid::Uuid;

use crate::validate;

/// Geofence domain service.
///
/// Generic over the repository implementation so the domain layer has
/// no dependency on the database crate. Holds no state of its own;
/// every read goes to the store.
pub struct GeofenceService<R: GeofenceRepository> {
    repo: R,
}

impl<R: GeofenceRepository> GeofenceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a geofence: validate, check for duplicates, persist.
    ///
    /// The duplicate check and the insert are two store round-trips
    /// with no isolation between them; the unique index on `name`
    /// catches the losing side of a concurrent create.
    pub async fn create(&self, input: CreateGeofence) -> PerimeterResult<Geofence> {
        validate::validate_create(&input)?;

        let existing = self
            .repo
            .find_duplicate(&input.name, &input.geo_code_data.geometry.coordinates)
            .await?;
        if let Some(existing) = existing {
            debug!(name = %input.name, existing_id = %existing.id, "duplicate geofence rejected");
            return Err(PerimeterError::duplicate());
        }

        self.repo.create(input).await
    }

    /// One page of records plus the unconditioned total count.
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
    ) -> PerimeterResult<PaginatedResult<Geofence>> {
        self.repo.list(Pagination::from_page(page, limit)).await
    }

    /// One page of records matching `search_text`, with the total
    /// computed under the same predicate. An empty `search_text`
    /// matches every record.
    pub async fn search(
        &self,
        page: u64,
        limit: u64,
        search_text: &str,
    ) -> PerimeterResult<PaginatedResult<Geofence>> {
        self.repo
            .search(search_text, Pagination::from_page(page, limit))
            .await
    }

    pub async fn get(&self, id: Uuid) -> PerimeterResult<Geofence> {
        self.repo.get_by_id(id).await
    }

    /// Apply a partial update to an existing record.
    ///
    /// Duplicates are not re-checked here; a rename that collides still
    /// fails on the store's unique name index.
    pub async fn update(&self, id: Uuid, input: UpdateGeofence) -> PerimeterResult<Geofence> {
        validate::validate_update(&input)?;
        self.repo.update(id, input).await
    }

    pub async fn delete(&self, id: Uuid) -> PerimeterResult<()> {
        self.repo.delete(id).await
    }
}
