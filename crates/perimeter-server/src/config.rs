//! Server configuration from environment variables.

use perimeter_db::DbConfig;

/// Runtime configuration for the Perimeter server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    pub db: DbConfig,
}

impl ServerConfig {
    /// Load configuration from `PERIMETER_*` environment variables,
    /// falling back to defaults suitable for local development.
    pub fn from_env() -> Self {
        let mut db = DbConfig::default();
        if let Ok(url) = std::env::var("PERIMETER_DB_URL") {
            db.url = url;
        }
        if let Ok(namespace) = std::env::var("PERIMETER_DB_NS") {
            db.namespace = namespace;
        }
        if let Ok(database) = std::env::var("PERIMETER_DB_NAME") {
            db.database = database;
        }
        if let Ok(username) = std::env::var("PERIMETER_DB_USER") {
            db.username = username;
        }
        if let Ok(password) = std::env::var("PERIMETER_DB_PASS") {
            db.password = password;
        }

        Self {
            bind_addr: std::env::var("PERIMETER_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8080".into()),
            db,
        }
    }
}
