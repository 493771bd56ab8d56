//! Domain models for Perimeter.
//!
//! These are the core types shared across all crates.

pub mod geofence;
