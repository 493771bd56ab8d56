//! Schema definitions and migration runner for SurrealDB.
//!
//! The geofence table uses SCHEMAFULL mode for data integrity. UUIDs
//! are stored as strings. Timestamps default to `time::now()` so the
//! store, not the application, maintains them.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — geofence table
// -----------------------------------------------------------------------

// The UNIQUE index on `name` backstops the application-level duplicate
// guard for concurrent creates. Coordinates carry no index: SurrealDB
// unique indexes on array columns are per-element, stricter than the
// whole-array equality the duplicate guard enforces.
const SCHEMA_V1: &str = "\
-- =======================================================================
-- Geofences (global scope)
-- =======================================================================
DEFINE TABLE geofence SCHEMAFULL;
DEFINE FIELD client_id ON TABLE geofence TYPE string;
DEFINE FIELD name ON TABLE geofence TYPE string;
DEFINE FIELD mobile_number ON TABLE geofence TYPE int;
DEFINE FIELD address ON TABLE geofence TYPE object;
DEFINE FIELD address.zip_code ON TABLE geofence TYPE string;
DEFINE FIELD address.country ON TABLE geofence TYPE string;
DEFINE FIELD address.state ON TABLE geofence TYPE string;
DEFINE FIELD address.area ON TABLE geofence TYPE string;
DEFINE FIELD address.city ON TABLE geofence TYPE string;
DEFINE FIELD address.district ON TABLE geofence TYPE string;
DEFINE FIELD final_address ON TABLE geofence TYPE string;
DEFINE FIELD location_type ON TABLE geofence TYPE option<string>;
DEFINE FIELD geo_code_data ON TABLE geofence TYPE object;
DEFINE FIELD geo_code_data.type ON TABLE geofence TYPE string;
DEFINE FIELD geo_code_data.geometry ON TABLE geofence TYPE object;
DEFINE FIELD geo_code_data.geometry.type ON TABLE geofence TYPE string;
DEFINE FIELD geo_code_data.geometry.coordinates ON TABLE geofence \
    TYPE array;
DEFINE FIELD geo_code_data.geometry.coordinates.* ON TABLE geofence \
    TYPE float;
DEFINE FIELD geo_code_data.geometry.radius ON TABLE geofence TYPE float;
DEFINE FIELD created_by ON TABLE geofence TYPE string;
DEFINE FIELD created_at ON TABLE geofence TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE geofence TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_geofence_name ON TABLE geofence COLUMNS name UNIQUE;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;
        }
    }

    Ok(())
}

/// The initial schema DDL, exposed for inspection and tests.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
