//! Aggregated OpenAPI specification.

use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the match ladder backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::player::create_player,
        crate::routes::player::list_players,
        crate::routes::player::get_player,
        crate::routes::game::list_games,
        crate::routes::game::get_game,
        crate::routes::game::create_game,
        crate::routes::game::cancel_game,
        crate::routes::game::submit_result,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::player::CreatePlayerRequest,
            crate::dto::player::PlayerSummary,
            crate::dto::player::EnrichedPlayerSummary,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::SubmitResultRequest,
            crate::dto::game::GameSummary,
            crate::dao::models::GameStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Player registration, listing, and statistics"),
        (name = "games", description = "Game creation and lifecycle transitions"),
    )
)]
pub struct ApiDoc;
