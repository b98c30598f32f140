//! Data access layer: entities, storage abstraction, and backends.

/// Persistence abstraction and backends for players and games.
pub mod match_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
