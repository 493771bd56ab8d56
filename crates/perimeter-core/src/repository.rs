//! Repository trait definition for data access abstraction.
//!
//! All repository operations are async. The domain service is the sole
//! caller of this port; implementations own every query against the
//! store and treat each read as authoritative (no caching).

use uuid::Uuid;

use crate::error::PerimeterResult;
use crate::models::geofence::{CreateGeofence, Geofence, UpdateGeofence};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
        }
    }
}

impl Pagination {
    /// Build from a 1-based page number: `offset = (page - 1) * limit`.
    /// Page and limit are clamped to at least 1.
    pub fn from_page(page: u64, limit: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            offset: (page - 1) * limit,
            limit,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait GeofenceRepository: Send + Sync {
    fn create(
        &self,
        input: CreateGeofence,
    ) -> impl Future<Output = PerimeterResult<Geofence>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = PerimeterResult<Geofence>> + Send;
    /// First record colliding with `name` or `coordinates`, if any.
    /// A collision on either field alone counts.
    fn find_duplicate(
        &self,
        name: &str,
        coordinates: &[f64],
    ) -> impl Future<Output = PerimeterResult<Option<Geofence>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateGeofence,
    ) -> impl Future<Output = PerimeterResult<Geofence>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = PerimeterResult<()>> + Send;
    /// One page of records plus the unconditioned total count.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = PerimeterResult<PaginatedResult<Geofence>>> + Send;
    /// Case-insensitive substring match over name, location type, city
    /// and state. The total is computed under the same predicate.
    fn search(
        &self,
        search_text: &str,
        pagination: Pagination,
    ) -> impl Future<Output = PerimeterResult<PaginatedResult<Geofence>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn pagination_from_page_computes_offset() {
        let p = Pagination::from_page(3, 10);
        assert_eq!(p.offset, 20);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn pagination_from_page_clamps_to_one() {
        let p = Pagination::from_page(0, 0);
        assert_eq!(p.offset, 0);
        assert_eq!(p.limit, 1);
    }
}
