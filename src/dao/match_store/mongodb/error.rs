//! MongoDB backend errors, one variant per failing operation.

use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

use crate::dao::storage::StorageError;

/// Result alias for MongoDB dao operations.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Error raised by the MongoDB backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// The offending URI.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The client could not be built from parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The initial connection ping never succeeded.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Number of ping attempts made.
        attempts: u32,
        /// Driver error from the last attempt.
        #[source]
        source: MongoError,
    },
    /// A health-check ping failed on an established connection.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Index creation failed.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Target collection.
        collection: &'static str,
        /// Index description.
        index: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A player named `{name}` already exists (unique index violation).
    #[error("a player named `{name}` already exists")]
    DuplicatePlayerName {
        /// The colliding name.
        name: String,
    },
    /// Player insertion failed.
    #[error("failed to save player `{name}`")]
    SavePlayer {
        /// Name of the player being saved.
        name: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Player lookup failed.
    #[error("failed to load player `{id}`")]
    LoadPlayer {
        /// Player id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Player listing failed.
    #[error("failed to list players")]
    ListPlayers {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Game insertion failed.
    #[error("failed to save game `{id}`")]
    SaveGame {
        /// Game id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Game lookup failed.
    #[error("failed to load game `{id}`")]
    LoadGame {
        /// Game id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Game listing failed.
    #[error("failed to list games")]
    ListGames {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Conditional game update failed.
    #[error("failed to update game `{id}`")]
    UpdateGame {
        /// Game id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Counting a player's games failed.
    #[error("failed to count games for player `{player}`")]
    CountGames {
        /// Participant id.
        player: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
}

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::DuplicatePlayerName { name } => StorageError::DuplicateName { name },
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
