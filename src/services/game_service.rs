//! Game lifecycle operations: creation, cancellation, result submission.

use uuid::Uuid;

use crate::{
    dao::models::{GAME_PLAYER_COUNT, GameEntity},
    dto::game::{CreateGameRequest, GameSummary, SubmitResultRequest},
    error::ServiceError,
    state::SharedState,
};

/// Create a pending game between exactly two existing, distinct players.
pub async fn create(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameSummary, ServiceError> {
    let players = request.players;

    if players.len() != GAME_PLAYER_COUNT {
        return Err(ServiceError::InvalidParticipants(format!(
            "a game requires exactly {GAME_PLAYER_COUNT} participants, got {}",
            players.len()
        )));
    }

    if players[0] == players[1] {
        return Err(ServiceError::InvalidParticipants(
            "participants must be distinct".into(),
        ));
    }

    let store = state.require_match_store().await?;
    for player in &players {
        if store.find_player(*player).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "player `{player}` not found"
            )));
        }
    }

    let game = GameEntity::new(players);
    store.insert_game(game.clone()).await?;
    Ok(game.into())
}

/// List all games in creation order.
pub async fn list(state: &SharedState) -> Result<Vec<GameSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let games = store.list_games().await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Fetch a single game by id.
pub async fn get(state: &SharedState, id: Uuid) -> Result<GameSummary, ServiceError> {
    let store = state.require_match_store().await?;
    let Some(game) = store.find_game(id).await? else {
        return Err(ServiceError::NotFound(format!("game `{id}` not found")));
    };
    Ok(game.into())
}

/// Move a pending game to `cancelled`.
///
/// The store performs the transition as a conditional update; a miss is then
/// disambiguated into not-found versus already-terminal.
pub async fn cancel_game(state: &SharedState, id: Uuid) -> Result<GameSummary, ServiceError> {
    let store = state.require_match_store().await?;

    match store.cancel_pending_game(id).await? {
        Some(game) => Ok(game.into()),
        None => Err(terminal_transition_miss(state, id).await?),
    }
}

/// Record the winner of a pending game, moving it to `completed`.
pub async fn submit_result(
    state: &SharedState,
    id: Uuid,
    request: SubmitResultRequest,
) -> Result<GameSummary, ServiceError> {
    let store = state.require_match_store().await?;

    // Participants are immutable after creation, so resolving the winner id
    // before the conditional update does not race with other writers.
    let Some(game) = store.find_game(id).await? else {
        return Err(ServiceError::NotFound(format!("game `{id}` not found")));
    };

    let Some(&winner) = game.players.get(request.winner) else {
        return Err(ServiceError::InvalidWinnerIndex(request.winner));
    };

    match store.complete_pending_game(id, winner).await? {
        Some(updated) => Ok(updated.into()),
        None => Err(terminal_transition_miss(state, id).await?),
    }
}

/// A conditional update matched nothing: either the game is gone or it
/// already reached a terminal status.
async fn terminal_transition_miss(
    state: &SharedState,
    id: Uuid,
) -> Result<ServiceError, ServiceError> {
    let store = state.require_match_store().await?;
    match store.find_game(id).await? {
        None => Ok(ServiceError::NotFound(format!("game `{id}` not found"))),
        Some(game) => Ok(ServiceError::InvalidState(format!(
            "game `{id}` is {} and cannot transition",
            game.status.as_str()
        ))),
    }
}
