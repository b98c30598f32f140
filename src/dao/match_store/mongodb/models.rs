//! BSON document shapes for the `players` and `games` collections.

use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{GameEntity, GameStatus, PlayerEntity};

/// Stored shape of a player document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoPlayerDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    rating: i32,
    created_at: DateTime,
}

impl From<PlayerEntity> for MongoPlayerDocument {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            rating: value.rating,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoPlayerDocument> for PlayerEntity {
    fn from(value: MongoPlayerDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
            rating: value.rating,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Stored shape of a game document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    players: Vec<Uuid>,
    status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<Uuid>,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id,
            players: value.players,
            status: value.status,
            winner: value.winner,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoGameDocument> for GameEntity {
    fn from(value: MongoGameDocument) -> Self {
        Self {
            id: value.id,
            players: value.players,
            status: value.status,
            winner: value.winner,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

/// Encode a UUID the way the driver stores `_id` fields.
pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Filter document selecting a record by `_id`.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    #[test]
    fn game_document_round_trips_through_entity() {
        let entity = GameEntity {
            id: Uuid::new_v4(),
            players: vec![Uuid::new_v4(), Uuid::new_v4()],
            status: GameStatus::Completed,
            winner: Some(Uuid::new_v4()),
            created_at: SystemTime::UNIX_EPOCH,
            updated_at: SystemTime::UNIX_EPOCH,
        };

        let document: MongoGameDocument = entity.clone().into();
        let back: GameEntity = document.into();
        assert_eq!(back, entity);
    }

    #[test]
    fn pending_game_document_omits_winner() {
        let entity = GameEntity::new(vec![Uuid::new_v4(), Uuid::new_v4()]);
        let document: MongoGameDocument = entity.into();
        let json = serde_json::to_value(&document).unwrap();
        assert!(json.get("winner").is_none());
    }
}
