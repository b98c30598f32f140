//! Parsed MongoDB connection settings.

use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Parsed client options plus the target database name.
#[derive(Clone)]
pub struct MongoConfig {
    /// Driver options parsed from the connection URI.
    pub options: ClientOptions,
    /// Database holding the `players` and `games` collections.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse a connection URI into driver options.
    pub async fn from_uri(uri: &str, db_name: &str) -> MongoResult<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|source| MongoDaoError::InvalidUri {
                uri: uri.to_owned(),
                source,
            })?;

        Ok(Self {
            options,
            database_name: db_name.to_owned(),
        })
    }
}
