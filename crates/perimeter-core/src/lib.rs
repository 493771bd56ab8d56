//! Perimeter Core — domain models, error taxonomy and the repository
//! port shared across all crates.

pub mod error;
pub mod models;
pub mod repository;
