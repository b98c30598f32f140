//! Entities shared between the storage backends and the service layer.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of participants every game has.
pub const GAME_PLAYER_COUNT: usize = 2;

/// A registered player persisted in the `players` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Primary key of the player, assigned at the store boundary.
    pub id: Uuid,
    /// Display name, unique across all players.
    pub name: String,
    /// Stored rating value; not computed by any rating system here.
    pub rating: i32,
    /// Creation timestamp for auditing/ordering.
    pub created_at: SystemTime,
}

impl PlayerEntity {
    /// Build a fresh player with a new identifier and the given rating.
    pub fn new(name: String, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            rating,
            created_at: SystemTime::now(),
        }
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Game created, no result recorded yet.
    Pending,
    /// Game called off before a result was recorded. Terminal.
    Cancelled,
    /// Game finished with a recorded winner. Terminal.
    Completed,
}

impl GameStatus {
    /// Whether no further transition is permitted out of this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Cancelled | GameStatus::Completed)
    }

    /// Storage representation of the status, matching the serde rename.
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Pending => "pending",
            GameStatus::Cancelled => "cancelled",
            GameStatus::Completed => "completed",
        }
    }
}

/// A match between two players persisted in the `games` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key of the game, assigned at the store boundary.
    pub id: Uuid,
    /// Ordered pair of participant identifiers.
    pub players: Vec<Uuid>,
    /// Current lifecycle status.
    pub status: GameStatus,
    /// Identifier of the winning participant, set on result submission.
    pub winner: Option<Uuid>,
    /// Creation timestamp; defines the game-creation order used by enrichment.
    pub created_at: SystemTime,
    /// Last time the game was mutated.
    pub updated_at: SystemTime,
}

impl GameEntity {
    /// Build a fresh pending game between the given participants.
    pub fn new(players: Vec<Uuid>) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            players,
            status: GameStatus::Pending,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_non_terminal_status() {
        assert!(!GameStatus::Pending.is_terminal());
        assert!(GameStatus::Cancelled.is_terminal());
        assert!(GameStatus::Completed.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&GameStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(GameStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn new_game_starts_pending_without_winner() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let game = GameEntity::new(vec![a, b]);
        assert_eq!(game.status, GameStatus::Pending);
        assert_eq!(game.winner, None);
        assert_eq!(game.players, vec![a, b]);
    }
}
