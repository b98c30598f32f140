//! Environment-driven runtime configuration.

use std::env;

/// Default MongoDB endpoint used when `MONGO_URI` is absent.
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// Default database name used when `MONGO_DB` is absent.
const DEFAULT_MONGO_DB: &str = "moba";
/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 3000;

/// Immutable runtime configuration read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Name of the database holding the `players` and `games` collections.
    pub mongo_db: String,
    /// TCP port the HTTP server binds to.
    pub port: u16,
}

impl AppConfig {
    /// Read the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.into());
        let mongo_db = env::var("MONGO_DB").unwrap_or_else(|_| DEFAULT_MONGO_DB.into());
        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            mongo_uri,
            mongo_db,
            port,
        }
    }
}
