pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use bazaar_types::{
        common::{NewPlayer, Player},
        errors::{ApplicationError, DbError},
    };

    use crate::{
        repository::PlayerRepository,
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    /// In-memory player store. Assigns ids the way the real schema's
    /// AUTO_INCREMENT column does, and records the size of every inserted
    /// batch so tests can check the chunking.
    #[derive(Default, Clone)]
    pub struct MockPlayerRepository {
        players: Arc<Mutex<HashMap<i64, Player>>>,
        next_id: Arc<Mutex<i64>>,
        batch_sizes: Arc<Mutex<Vec<usize>>>,
    }

    impl MockPlayerRepository {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn batch_sizes(&self) -> Vec<usize> {
            self.batch_sizes.lock().unwrap().clone()
        }

        fn insert(&self, player: &NewPlayer) -> Player {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;

            let player = Player {
                id: *next_id,
                name: player.name.clone(),
                coins: player.coins,
                goods: player.goods,
            };
            self.players
                .lock()
                .unwrap()
                .insert(player.id, player.clone());

            player
        }
    }

    #[async_trait]
    impl PlayerRepository for MockPlayerRepository {
        async fn create(&self, player: &NewPlayer) -> Result<Player, ApplicationError> {
            Ok(self.insert(player))
        }

        async fn create_batch(&self, players: &[NewPlayer]) -> Result<u64, ApplicationError> {
            self.batch_sizes.lock().unwrap().push(players.len());
            for player in players {
                self.insert(player);
            }
            Ok(players.len() as u64)
        }

        async fn get_by_id(&self, player_id: i64) -> Result<Player, ApplicationError> {
            self.players
                .lock()
                .unwrap()
                .get(&player_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::PlayerNotFound(player_id)))
        }

        async fn get_by_id_for_update(&self, player_id: i64) -> Result<Player, ApplicationError> {
            // Single-threaded tests; a locking read behaves like a plain read.
            self.get_by_id(player_id).await
        }

        async fn get_by_name(&self, name: &str) -> Result<Player, ApplicationError> {
            self.players
                .lock()
                .unwrap()
                .values()
                .find(|p| p.name == name)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::Db(DbError::PlayerByNameNotFound(name.to_string()))
                })
        }

        async fn list_by_id_asc(&self, limit: i64) -> Result<Vec<Player>, ApplicationError> {
            let mut players: Vec<Player> =
                self.players.lock().unwrap().values().cloned().collect();
            players.sort_by_key(|p| p.id);
            players.truncate(limit.max(0) as usize);
            Ok(players)
        }

        async fn count(&self) -> Result<i64, ApplicationError> {
            Ok(self.players.lock().unwrap().len() as i64)
        }

        async fn adjust_balances(
            &self,
            player_id: i64,
            coins_delta: i64,
            goods_delta: i64,
        ) -> Result<(), ApplicationError> {
            let mut players = self.players.lock().unwrap();
            let player = players
                .get_mut(&player_id)
                .ok_or_else(|| ApplicationError::Db(DbError::PlayerNotFound(player_id)))?;

            player.coins += coins_delta;
            player.goods += goods_delta;

            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MockUnitOfWork {
        players: Arc<MockPlayerRepository>,

        // Flags to check if commit/rollback was called
        committed: Arc<Mutex<bool>>,
        rolled_back: Arc<Mutex<bool>>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn with_players(players: Arc<MockPlayerRepository>) -> Self {
            Self {
                players,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
            self.players.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.committed.lock().unwrap() = true;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.rolled_back.lock().unwrap() = true;
            Ok(())
        }
    }

    /// Hands every unit of work the same in-memory store, so state survives
    /// across bus calls in a test.
    #[derive(Default)]
    pub struct MockUnitOfWorkProvider {
        players: Arc<MockPlayerRepository>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn players(&self) -> Arc<MockPlayerRepository> {
            self.players.clone()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> =
                Box::new(MockUnitOfWork::with_players(self.players.clone()));
            Ok(uow)
        }
    }
}
