//! Persistence seam for players and games.

/// MongoDB-backed implementation.
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{GameEntity, PlayerEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for players and games.
///
/// The two `*_pending_game` methods carry the transition contract: they must
/// update the game only while its status is still `pending`, atomically, and
/// return `None` when no pending game with that id exists. Two concurrent
/// result submissions therefore cannot both succeed.
pub trait MatchStore: Send + Sync {
    /// Insert a new player. Fails with [`StorageError::DuplicateName`] when
    /// the name is already taken.
    ///
    /// [`StorageError::DuplicateName`]: crate::dao::storage::StorageError::DuplicateName
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a player by id.
    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    /// List players in insertion order, up to `limit` entries.
    fn list_players(&self, limit: i64) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    /// Count the games in which the player appears as a participant.
    fn count_player_games(&self, player: Uuid) -> BoxFuture<'static, StorageResult<u64>>;
    /// List the completed games in which the player appears as a
    /// participant, in game-creation order.
    fn list_completed_player_games(
        &self,
        player: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Insert a new game.
    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a game by id.
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// List all games in creation order.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Atomically move a pending game to `cancelled`, returning the updated
    /// game, or `None` when no pending game with this id exists.
    fn cancel_pending_game(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Atomically move a pending game to `completed` with the given winner,
    /// returning the updated game, or `None` when no pending game with this
    /// id exists.
    fn complete_pending_game(
        &self,
        id: Uuid,
        winner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Cheap connectivity probe.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish the backend connection in place.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
