//! Game endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::game::{CreateGameRequest, GameSummary, SubmitResultRequest},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes handling game creation and lifecycle transitions.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games).post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/cancel", post(cancel_game))
        .route("/games/{id}/submit", post(submit_result))
}

/// List all games in creation order.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    responses((status = 200, description = "Games", body = [GameSummary]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameSummary>>, AppError> {
    let summaries = game_service::list(&state).await?;
    Ok(Json(summaries))
}

/// Fetch a single game.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game", body = GameSummary),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::get(&state, id).await?;
    Ok(Json(summary))
}

/// Create a pending game between two players.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = GameSummary),
        (status = 400, description = "Malformed participant list")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::create(&state, payload).await?;
    Ok(Json(summary))
}

/// Cancel a pending game.
#[utoipa::path(
    post,
    path = "/api/games/{id}/cancel",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game cancelled", body = GameSummary),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "Game already reached a terminal status")
    )
)]
pub async fn cancel_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::cancel_game(&state, id).await?;
    Ok(Json(summary))
}

/// Record the winner of a pending game.
#[utoipa::path(
    post,
    path = "/api/games/{id}/submit",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    request_body = SubmitResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = GameSummary),
        (status = 400, description = "Winner index out of range"),
        (status = 404, description = "Unknown game"),
        (status = 409, description = "Game already reached a terminal status")
    )
)]
pub async fn submit_result(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitResultRequest>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::submit_result(&state, id, payload).await?;
    Ok(Json(summary))
}
