//! MongoDB backend for the [`MatchStore`](super::MatchStore) seam.

/// Connection settings.
pub mod config;
mod connection;
/// Backend error definitions.
pub mod error;
mod models;
/// Store implementation.
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoMatchStore;
