//! Perimeter Service — the geofence domain service.
//!
//! Orchestrates validation, duplicate detection and persistence over
//! the [`GeofenceRepository`] port. This crate carries all decision
//! logic; transport and storage stay behind their respective crates.
//!
//! [`GeofenceRepository`]: perimeter_core::repository::GeofenceRepository

pub mod params;
pub mod service;
pub mod validate;

pub use service::GeofenceService;
