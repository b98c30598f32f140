//! MongoDB implementation of the [`MatchStore`] seam.

use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::{DateTime, Document, doc},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoGameDocument, MongoPlayerDocument, doc_id, uuid_as_binary},
};
use crate::dao::{
    match_store::MatchStore,
    models::{GameEntity, GameStatus, PlayerEntity},
    storage::StorageResult,
};

const PLAYER_COLLECTION_NAME: &str = "players";
const GAME_COLLECTION_NAME: &str = "games";

/// Error code MongoDB reports for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB-backed store for players and games.
#[derive(Clone)]
pub struct MongoMatchStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoMatchStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Create the indexes the services rely on.
    ///
    /// The unique index on `players.name` is what makes concurrent duplicate
    /// creations fail instead of both succeeding; the multikey index on
    /// `games.players` backs the participant lookups used by enrichment.
    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let players = database.collection::<Document>(PLAYER_COLLECTION_NAME);
        let name_index = mongodb::IndexModel::builder()
            .keys(doc! {"name": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("player_name_unique_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        players
            .create_index(name_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: PLAYER_COLLECTION_NAME,
                index: "name",
                source,
            })?;

        let games = database.collection::<Document>(GAME_COLLECTION_NAME);
        let participants_index = mongodb::IndexModel::builder()
            .keys(doc! {"players": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("game_players_idx".to_owned()))
                    .build(),
            )
            .build();

        games
            .create_index(participants_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GAME_COLLECTION_NAME,
                index: "players",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn player_collection(&self) -> Collection<MongoPlayerDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoPlayerDocument>(PLAYER_COLLECTION_NAME)
    }

    async fn game_collection(&self) -> Collection<MongoGameDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoGameDocument>(GAME_COLLECTION_NAME)
    }

    async fn insert_player(&self, player: PlayerEntity) -> MongoResult<()> {
        let name = player.name.clone();
        let document: MongoPlayerDocument = player.into();
        let collection = self.player_collection().await;

        collection.insert_one(&document).await.map_err(|source| {
            if is_duplicate_key_error(&source) {
                MongoDaoError::DuplicatePlayerName { name: name.clone() }
            } else {
                MongoDaoError::SavePlayer {
                    name: name.clone(),
                    source,
                }
            }
        })?;

        Ok(())
    }

    async fn find_player(&self, id: Uuid) -> MongoResult<Option<PlayerEntity>> {
        let collection = self.player_collection().await;

        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadPlayer { id, source })?;

        Ok(document.map(Into::into))
    }

    async fn list_players(&self, limit: i64) -> MongoResult<Vec<PlayerEntity>> {
        let collection = self.player_collection().await;

        let documents: Vec<MongoPlayerDocument> = collection
            .find(doc! {})
            .sort(doc! {"created_at": 1})
            .limit(limit)
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn count_player_games(&self, player: Uuid) -> MongoResult<u64> {
        let collection = self.game_collection().await;

        collection
            .count_documents(doc! {"players": uuid_as_binary(player)})
            .await
            .map_err(|source| MongoDaoError::CountGames { player, source })
    }

    async fn list_completed_player_games(&self, player: Uuid) -> MongoResult<Vec<GameEntity>> {
        let collection = self.game_collection().await;

        let documents: Vec<MongoGameDocument> = collection
            .find(doc! {
                "players": uuid_as_binary(player),
                "status": GameStatus::Completed.as_str(),
            })
            .sort(doc! {"created_at": 1})
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn insert_game(&self, game: GameEntity) -> MongoResult<()> {
        let id = game.id;
        let document: MongoGameDocument = game.into();
        let collection = self.game_collection().await;

        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveGame { id, source })?;

        Ok(())
    }

    async fn find_game(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        let collection = self.game_collection().await;

        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadGame { id, source })?;

        Ok(document.map(Into::into))
    }

    async fn list_games(&self) -> MongoResult<Vec<GameEntity>> {
        let collection = self.game_collection().await;

        let documents: Vec<MongoGameDocument> = collection
            .find(doc! {})
            .sort(doc! {"created_at": 1})
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    /// Conditional update guarded on `status == pending`; the filter is the
    /// compare-and-swap that keeps concurrent terminal transitions mutually
    /// exclusive.
    async fn update_pending_game(
        &self,
        id: Uuid,
        set: Document,
    ) -> MongoResult<Option<GameEntity>> {
        let collection = self.game_collection().await;

        let updated = collection
            .find_one_and_update(
                doc! {
                    "_id": uuid_as_binary(id),
                    "status": GameStatus::Pending.as_str(),
                },
                doc! {"$set": set},
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|source| MongoDaoError::UpdateGame { id, source })?;

        Ok(updated.map(Into::into))
    }

    async fn cancel_pending_game(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        self.update_pending_game(
            id,
            doc! {
                "status": GameStatus::Cancelled.as_str(),
                "updated_at": DateTime::now(),
            },
        )
        .await
    }

    async fn complete_pending_game(
        &self,
        id: Uuid,
        winner: Uuid,
    ) -> MongoResult<Option<GameEntity>> {
        self.update_pending_game(
            id,
            doc! {
                "status": GameStatus::Completed.as_str(),
                "winner": uuid_as_binary(winner),
                "updated_at": DateTime::now(),
            },
        )
        .await
    }
}

fn is_duplicate_key_error(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

impl MatchStore for MongoMatchStore {
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_player(player).await.map_err(Into::into) })
    }

    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_player(id).await.map_err(Into::into) })
    }

    fn list_players(&self, limit: i64) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_players(limit).await.map_err(Into::into) })
    }

    fn count_player_games(&self, player: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_player_games(player).await.map_err(Into::into) })
    }

    fn list_completed_player_games(
        &self,
        player: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_completed_player_games(player)
                .await
                .map_err(Into::into)
        })
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_game(game).await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_games().await.map_err(Into::into) })
    }

    fn cancel_pending_game(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.cancel_pending_game(id).await.map_err(Into::into) })
    }

    fn complete_pending_game(
        &self,
        id: Uuid,
        winner: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .complete_pending_game(id, winner)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
