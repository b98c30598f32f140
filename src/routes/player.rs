//! Player endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::player::{CreatePlayerRequest, EnrichedPlayerSummary, ListPlayersQuery, PlayerSummary},
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Routes handling player registration, listing, and statistics.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", post(create_player).get(list_players))
        .route("/players/{id}", get(get_player))
}

/// Register a new player.
#[utoipa::path(
    post,
    path = "/api/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    responses(
        (status = 200, description = "Player created", body = PlayerSummary),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_player(
    State(state): State<SharedState>,
    Json(payload): Json<CreatePlayerRequest>,
) -> Result<Json<PlayerSummary>, AppError> {
    let summary = player_service::create(&state, payload).await?;
    Ok(Json(summary))
}

/// List players in insertion order, up to the requested limit.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    params(ListPlayersQuery),
    responses((status = 200, description = "Players", body = [PlayerSummary]))
)]
pub async fn list_players(
    State(state): State<SharedState>,
    Query(query): Query<ListPlayersQuery>,
) -> Result<Json<Vec<PlayerSummary>>, AppError> {
    let summaries = player_service::list(&state, query).await?;
    Ok(Json(summaries))
}

/// Return a player enriched with statistics derived from their games.
#[utoipa::path(
    get,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = Uuid, Path, description = "Identifier of the player")),
    responses(
        (status = 200, description = "Enriched player", body = EnrichedPlayerSummary),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrichedPlayerSummary>, AppError> {
    let summary = player_service::enrich(&state, id).await?;
    Ok(Json(summary))
}
