//! Game request and response shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, GameStatus},
    dto::format_system_time,
};

/// Payload used to create a game between two players.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    /// Ordered pair of participant identifiers.
    pub players: Vec<Uuid>,
}

/// Payload used to record the result of a game.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitResultRequest {
    /// Index into the game's participant pair (0 or 1) naming the winner.
    pub winner: usize,
}

/// Public projection of a stored game.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameSummary {
    /// Game identifier.
    pub id: Uuid,
    /// Ordered pair of participant identifiers.
    pub players: Vec<Uuid>,
    /// Current lifecycle status.
    pub status: GameStatus,
    /// Winning participant, present once a result was submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Uuid>,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 timestamp of the last mutation.
    pub updated_at: String,
}

impl From<GameEntity> for GameSummary {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id,
            players: value.players,
            status: value.status,
            winner: value.winner,
            created_at: format_system_time(value.created_at),
            updated_at: format_system_time(value.updated_at),
        }
    }
}
