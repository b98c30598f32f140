//! Player creation, listing, and statistics enrichment.

use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{GameEntity, PlayerEntity},
    dto::player::{CreatePlayerRequest, EnrichedPlayerSummary, ListPlayersQuery, PlayerSummary},
    error::ServiceError,
    state::SharedState,
};

/// Register a new player.
///
/// Name uniqueness is enforced by the unique index on `players.name`; the
/// store surfaces a violation as a duplicate-name error rather than this
/// service pre-checking (which would race with concurrent writers).
pub async fn create(
    state: &SharedState,
    request: CreatePlayerRequest,
) -> Result<PlayerSummary, ServiceError> {
    request.validate()?;

    let store = state.require_match_store().await?;
    let player = PlayerEntity::new(request.name, request.rating.unwrap_or(0));

    store.insert_player(player.clone()).await?;
    Ok(player.into())
}

/// List players in insertion order, honoring the coerced limit.
pub async fn list(
    state: &SharedState,
    query: ListPlayersQuery,
) -> Result<Vec<PlayerSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let players = store.list_players(query.effective_limit()).await?;
    Ok(players.into_iter().map(Into::into).collect())
}

/// Augment a player record with statistics derived from the games
/// collection. Read-only; never mutates stored data.
pub async fn enrich(
    state: &SharedState,
    id: Uuid,
) -> Result<EnrichedPlayerSummary, ServiceError> {
    let store = state.require_match_store().await?;

    let Some(player) = store.find_player(id).await? else {
        return Err(ServiceError::NotFound(format!("player `{id}` not found")));
    };

    let total_games = store.count_player_games(id).await?;
    let completed = store.list_completed_player_games(id).await?;

    Ok(EnrichedPlayerSummary {
        player: player.into(),
        total_games,
        recent_results: recent_results(id, &completed),
    })
}

/// One boolean per completed game, in game-creation order; `true` when the
/// player is the recorded winner. Games without a recorded result never
/// reach this function.
fn recent_results(player: Uuid, completed_games: &[GameEntity]) -> Vec<bool> {
    completed_games
        .iter()
        .filter_map(|game| game.winner.map(|winner| winner == player))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::GameStatus;

    fn completed_game(players: [Uuid; 2], winner: Uuid) -> GameEntity {
        let mut game = GameEntity::new(players.to_vec());
        game.status = GameStatus::Completed;
        game.winner = Some(winner);
        game
    }

    #[test]
    fn recent_results_follow_game_order() {
        let p0 = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();

        let games = vec![
            completed_game([p0, p1], p0),
            completed_game([p0, p2], p2),
        ];

        assert_eq!(recent_results(p0, &games), vec![true, false]);
        assert_eq!(recent_results(p1, &games[..1]), vec![false]);
    }

    #[test]
    fn recent_results_empty_without_completed_games() {
        let p0 = Uuid::new_v4();
        assert_eq!(recent_results(p0, &[]), Vec::<bool>::new());
    }

    #[test]
    fn games_missing_a_winner_are_skipped() {
        let p0 = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        // A completed game should always carry a winner; a document that
        // lost it is skipped instead of panicking.
        let mut game = completed_game([p0, p1], p0);
        game.winner = None;
        assert_eq!(recent_results(p0, &[game]), Vec::<bool>::new());
    }
}
