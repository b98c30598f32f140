//! HTTP routing.

use axum::Router;

use crate::state::SharedState;

/// Swagger UI routes.
pub mod docs;
/// Game routes.
pub mod game;
/// Health check routes.
pub mod health;
/// Player routes.
pub mod player;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = player::router().merge(game::router());

    let app_router = health::router()
        .nest("/api", api_router)
        .merge(docs::router(state.clone()));

    app_router.with_state(state)
}
