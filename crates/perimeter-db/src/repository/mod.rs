//! SurrealDB repository implementations.

mod geofence;

pub use geofence::SurrealGeofenceRepository;
