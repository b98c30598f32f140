//! Service-level tests driven through an in-memory `MatchStore`.
//!
//! The in-memory backend honors the same contracts as the MongoDB one:
//! insertion order, the unique player name constraint, and conditional
//! terminal transitions that only match games still in `pending`.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use uuid::Uuid;

use moba_ladder_back::{
    dao::{
        match_store::MatchStore,
        models::{GameEntity, GameStatus, PlayerEntity},
        storage::{StorageError, StorageResult},
    },
    dto::{
        game::{CreateGameRequest, GameSummary, SubmitResultRequest},
        player::{CreatePlayerRequest, ListPlayersQuery, PlayerSummary},
    },
    error::ServiceError,
    services::{game_service, player_service},
    state::{AppState, SharedState},
};

#[derive(Clone, Default)]
struct InMemoryMatchStore {
    players: Arc<Mutex<Vec<PlayerEntity>>>,
    games: Arc<Mutex<Vec<GameEntity>>>,
}

impl InMemoryMatchStore {
    fn stored_players(&self) -> Vec<PlayerEntity> {
        self.players.lock().unwrap().clone()
    }

    fn stored_games(&self) -> Vec<GameEntity> {
        self.games.lock().unwrap().clone()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let players = self.players.clone();
        Box::pin(async move {
            let mut guard = players.lock().unwrap();
            if guard.iter().any(|existing| existing.name == player.name) {
                return Err(StorageError::DuplicateName { name: player.name });
            }
            guard.push(player);
            Ok(())
        })
    }

    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let players = self.players.clone();
        Box::pin(async move {
            let guard = players.lock().unwrap();
            Ok(guard.iter().find(|player| player.id == id).cloned())
        })
    }

    fn list_players(&self, limit: i64) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let players = self.players.clone();
        Box::pin(async move {
            let guard = players.lock().unwrap();
            Ok(guard.iter().take(limit as usize).cloned().collect())
        })
    }

    fn count_player_games(&self, player: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        let games = self.games.clone();
        Box::pin(async move {
            let guard = games.lock().unwrap();
            Ok(guard
                .iter()
                .filter(|game| game.players.contains(&player))
                .count() as u64)
        })
    }

    fn list_completed_player_games(
        &self,
        player: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move {
            let guard = games.lock().unwrap();
            Ok(guard
                .iter()
                .filter(|game| {
                    game.status == GameStatus::Completed && game.players.contains(&player)
                })
                .cloned()
                .collect())
        })
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let games = self.games.clone();
        Box::pin(async move {
            games.lock().unwrap().push(game);
            Ok(())
        })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move {
            let guard = games.lock().unwrap();
            Ok(guard.iter().find(|game| game.id == id).cloned())
        })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move { Ok(games.lock().unwrap().clone()) })
    }

    fn cancel_pending_game(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move {
            let mut guard = games.lock().unwrap();
            let Some(game) = guard
                .iter_mut()
                .find(|game| game.id == id && game.status == GameStatus::Pending)
            else {
                return Ok(None);
            };
            game.status = GameStatus::Cancelled;
            Ok(Some(game.clone()))
        })
    }

    fn complete_pending_game(
        &self,
        id: Uuid,
        winner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let games = self.games.clone();
        Box::pin(async move {
            let mut guard = games.lock().unwrap();
            let Some(game) = guard
                .iter_mut()
                .find(|game| game.id == id && game.status == GameStatus::Pending)
            else {
                return Ok(None);
            };
            game.status = GameStatus::Completed;
            game.winner = Some(winner);
            Ok(Some(game.clone()))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

async fn state_with_store() -> (SharedState, InMemoryMatchStore) {
    let store = InMemoryMatchStore::default();
    let state = AppState::new();
    state.install_match_store(Arc::new(store.clone())).await;
    (state, store)
}

async fn create_player(state: &SharedState, name: &str) -> PlayerSummary {
    player_service::create(
        state,
        CreatePlayerRequest {
            name: name.into(),
            rating: None,
        },
    )
    .await
    .expect("player creation failed")
}

async fn create_game(state: &SharedState, players: Vec<Uuid>) -> GameSummary {
    game_service::create(state, CreateGameRequest { players })
        .await
        .expect("game creation failed")
}

fn limit_query(limit: Option<&str>) -> ListPlayersQuery {
    ListPlayersQuery {
        limit: limit.map(str::to_owned),
    }
}

#[tokio::test]
async fn create_player_uses_default_rating() {
    let (state, _store) = state_with_store().await;
    let player = create_player(&state, "foo").await;
    assert_eq!(player.name, "foo");
    assert_eq!(player.rating, 0);
}

#[tokio::test]
async fn create_player_honors_initial_rating() {
    let (state, _store) = state_with_store().await;
    let player = player_service::create(
        &state,
        CreatePlayerRequest {
            name: "bar".into(),
            rating: Some(10),
        },
    )
    .await
    .unwrap();
    assert_eq!(player.rating, 10);
}

#[tokio::test]
async fn duplicate_player_name_is_rejected() {
    let (state, store) = state_with_store().await;
    create_player(&state, "foo").await;

    let err = player_service::create(
        &state,
        CreatePlayerRequest {
            name: "foo".into(),
            rating: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateName(name) if name == "foo"));
    assert_eq!(store.stored_players().len(), 1);
}

#[tokio::test]
async fn empty_player_name_is_rejected() {
    let (state, store) = state_with_store().await;
    let err = player_service::create(
        &state,
        CreatePlayerRequest {
            name: String::new(),
            rating: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(store.stored_players().is_empty());
}

#[tokio::test]
async fn list_returns_fifty_players_by_default() {
    let (state, _store) = state_with_store().await;
    for i in 0..60 {
        create_player(&state, &format!("player-{i}")).await;
    }

    let players = player_service::list(&state, limit_query(None)).await.unwrap();
    assert_eq!(players.len(), 50);
}

#[tokio::test]
async fn list_accepts_other_limits() {
    let (state, _store) = state_with_store().await;
    for i in 0..60 {
        create_player(&state, &format!("player-{i}")).await;
    }

    let players = player_service::list(&state, limit_query(Some("5")))
        .await
        .unwrap();
    assert_eq!(players.len(), 5);

    // A limit that cannot be coerced falls back to the default.
    let players = player_service::list(&state, limit_query(Some("many")))
        .await
        .unwrap();
    assert_eq!(players.len(), 50);
}

#[tokio::test]
async fn enrich_counts_games_per_participant() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let p2 = create_player(&state, "player-2").await;

    create_game(&state, vec![p0.id, p1.id]).await;
    create_game(&state, vec![p0.id, p2.id]).await;

    let enriched = player_service::enrich(&state, p0.id).await.unwrap();
    assert_eq!(enriched.total_games, 2);
    let enriched = player_service::enrich(&state, p1.id).await.unwrap();
    assert_eq!(enriched.total_games, 1);
    let enriched = player_service::enrich(&state, p2.id).await.unwrap();
    assert_eq!(enriched.total_games, 1);
}

#[tokio::test]
async fn enrich_reports_recent_results_in_creation_order() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let p2 = create_player(&state, "player-2").await;

    let g1 = create_game(&state, vec![p0.id, p1.id]).await;
    let g2 = create_game(&state, vec![p0.id, p2.id]).await;

    game_service::submit_result(&state, g1.id, SubmitResultRequest { winner: 0 })
        .await
        .unwrap();
    game_service::submit_result(&state, g2.id, SubmitResultRequest { winner: 1 })
        .await
        .unwrap();

    // P0 won G1 and lost G2.
    let enriched = player_service::enrich(&state, p0.id).await.unwrap();
    assert_eq!(enriched.recent_results, vec![true, false]);

    // Pending games never contribute entries.
    let p3 = create_player(&state, "player-3").await;
    create_game(&state, vec![p0.id, p3.id]).await;
    let enriched = player_service::enrich(&state, p0.id).await.unwrap();
    assert_eq!(enriched.total_games, 3);
    assert_eq!(enriched.recent_results, vec![true, false]);
}

#[tokio::test]
async fn enrich_unknown_player_is_not_found() {
    let (state, _store) = state_with_store().await;
    let err = player_service::enrich(&state, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn create_game_requires_exactly_two_participants() {
    let (state, store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let p2 = create_player(&state, "player-2").await;

    let err = game_service::create(
        &state,
        CreateGameRequest {
            players: vec![p0.id],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParticipants(_)));

    let err = game_service::create(
        &state,
        CreateGameRequest {
            players: vec![p0.id, p1.id, p2.id],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParticipants(_)));

    assert!(store.stored_games().is_empty());
}

#[tokio::test]
async fn create_game_rejects_identical_participants() {
    let (state, store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;

    let err = game_service::create(
        &state,
        CreateGameRequest {
            players: vec![p0.id, p0.id],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParticipants(_)));
    assert!(store.stored_games().is_empty());
}

#[tokio::test]
async fn create_game_rejects_unknown_participants() {
    let (state, store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;

    let err = game_service::create(
        &state,
        CreateGameRequest {
            players: vec![p0.id, Uuid::new_v4()],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(store.stored_games().is_empty());
}

#[tokio::test]
async fn created_game_starts_pending_without_winner() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;

    let game = create_game(&state, vec![p0.id, p1.id]).await;
    assert_eq!(game.status, GameStatus::Pending);
    assert_eq!(game.players, vec![p0.id, p1.id]);
    assert_eq!(game.winner, None);
}

#[tokio::test]
async fn cancel_moves_pending_game_to_cancelled() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let game = create_game(&state, vec![p0.id, p1.id]).await;

    let cancelled = game_service::cancel_game(&state, game.id).await.unwrap();
    assert_eq!(cancelled.status, GameStatus::Cancelled);
    assert_eq!(cancelled.winner, None);
}

#[tokio::test]
async fn cancel_on_terminal_game_fails_and_leaves_it_unchanged() {
    let (state, store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let game = create_game(&state, vec![p0.id, p1.id]).await;

    game_service::cancel_game(&state, game.id).await.unwrap();
    let before = store.stored_games();

    let err = game_service::cancel_game(&state, game.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));
    assert_eq!(store.stored_games(), before);

    let completed = create_game(&state, vec![p0.id, p1.id]).await;
    game_service::submit_result(&state, completed.id, SubmitResultRequest { winner: 0 })
        .await
        .unwrap();
    let err = game_service::cancel_game(&state, completed.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));
}

#[tokio::test]
async fn cancel_unknown_game_is_not_found() {
    let (state, _store) = state_with_store().await;
    let err = game_service::cancel_game(&state, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn submit_result_records_winner() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let game = create_game(&state, vec![p0.id, p1.id]).await;

    let completed = game_service::submit_result(&state, game.id, SubmitResultRequest { winner: 1 })
        .await
        .unwrap();
    assert_eq!(completed.status, GameStatus::Completed);
    assert_eq!(completed.winner, Some(p1.id));
}

#[tokio::test]
async fn submit_result_rejects_out_of_range_winner_index() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let game = create_game(&state, vec![p0.id, p1.id]).await;

    let err = game_service::submit_result(&state, game.id, SubmitResultRequest { winner: 2 })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidWinnerIndex(2)));

    // The failed submission must not have touched the game.
    let fetched = game_service::get(&state, game.id).await.unwrap();
    assert_eq!(fetched.status, GameStatus::Pending);
}

#[tokio::test]
async fn second_submission_on_same_game_fails() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let game = create_game(&state, vec![p0.id, p1.id]).await;

    game_service::submit_result(&state, game.id, SubmitResultRequest { winner: 0 })
        .await
        .unwrap();
    let err = game_service::submit_result(&state, game.id, SubmitResultRequest { winner: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    let fetched = game_service::get(&state, game.id).await.unwrap();
    assert_eq!(fetched.winner, Some(p0.id));
}

#[tokio::test]
async fn mutation_results_match_an_independent_refetch() {
    let (state, _store) = state_with_store().await;
    let p0 = create_player(&state, "player-0").await;
    let p1 = create_player(&state, "player-1").await;
    let game = create_game(&state, vec![p0.id, p1.id]).await;

    let submitted = game_service::submit_result(&state, game.id, SubmitResultRequest { winner: 0 })
        .await
        .unwrap();
    let fetched = game_service::get(&state, game.id).await.unwrap();

    assert_eq!(fetched.id, submitted.id);
    assert_eq!(fetched.players, submitted.players);
    assert_eq!(fetched.status, submitted.status);
    assert_eq!(fetched.winner, submitted.winner);
    assert_eq!(fetched.created_at, submitted.created_at);
}

#[tokio::test]
async fn operations_fail_while_degraded() {
    let store = InMemoryMatchStore::default();
    let state = AppState::new();
    state.install_match_store(Arc::new(store)).await;
    state.clear_match_store().await;

    let err = player_service::list(&state, limit_query(None)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Degraded));
    assert!(state.is_degraded().await);
}
