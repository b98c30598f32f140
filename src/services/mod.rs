//! Service layer implementing the application logic over the storage seam.

/// OpenAPI documentation generation.
pub mod documentation;
/// Game lifecycle operations.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Player creation, listing, and enrichment.
pub mod player_service;
/// Storage connection supervisor with degraded-mode handling.
pub mod storage_supervisor;
