//! Player request and response shapes.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{dao::models::PlayerEntity, dto::format_system_time};

/// Number of players returned by a listing when no limit is supplied.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Payload used to register a new player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlayerRequest {
    /// Display name, unique across all players.
    #[validate(length(min = 1, message = "player name must not be empty"))]
    pub name: String,
    /// Initial rating; defaults to 0 when omitted.
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Query string accepted by the player listing.
///
/// `limit` arrives as a raw query value; anything that does not parse as a
/// positive integer falls back to [`DEFAULT_LIST_LIMIT`].
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListPlayersQuery {
    /// Maximum number of players to return.
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListPlayersQuery {
    /// Coerce the raw limit value, falling back to the default.
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// Public projection of a stored player.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerSummary {
    /// Player identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Stored rating value.
    pub rating: i32,
    /// RFC3339 creation timestamp.
    pub created_at: String,
}

impl From<PlayerEntity> for PlayerSummary {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            rating: value.rating,
            created_at: format_system_time(value.created_at),
        }
    }
}

/// Player projection augmented with statistics derived from the games
/// collection. Never persisted.
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrichedPlayerSummary {
    /// The underlying player record.
    #[serde(flatten)]
    pub player: PlayerSummary,
    /// Number of games the player participated in, regardless of status.
    pub total_games: u64,
    /// One entry per completed game the player took part in, in
    /// game-creation order; `true` when the player won.
    pub recent_results: Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> ListPlayersQuery {
        ListPlayersQuery {
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn absent_limit_falls_back_to_default() {
        assert_eq!(query(None).effective_limit(), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn numeric_string_limit_is_accepted() {
        assert_eq!(query(Some("5")).effective_limit(), 5);
        assert_eq!(query(Some(" 12 ")).effective_limit(), 12);
    }

    #[test]
    fn non_coercible_limit_falls_back_to_default() {
        assert_eq!(query(Some("abc")).effective_limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(query(Some("")).effective_limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(query(Some("-3")).effective_limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(query(Some("0")).effective_limit(), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn empty_name_fails_validation() {
        let request = CreatePlayerRequest {
            name: String::new(),
            rating: None,
        };
        assert!(request.validate().is_err());
    }
}
