use sqlx::{MySql, QueryBuilder, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use bazaar_app::repository::PlayerRepository;
use bazaar_types::{
    Result,
    common::{NewPlayer, Player},
    errors::{ApplicationError, DbError},
};

use crate::models::{self as db_models};

/// Implements PlayerRepository and operates on transactions.
#[derive(Clone)]
pub struct MysqlPlayerRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, MySql>>>,
}

impl<'a> MysqlPlayerRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, MySql>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> PlayerRepository for MysqlPlayerRepository<'a> {
    async fn create(&self, player: &NewPlayer) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query("INSERT INTO players (name, coins, goods) VALUES (?, ?, ?)")
            .bind(&player.name)
            .bind(player.coins)
            .bind(player.goods)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(Player {
            id: result.last_insert_id() as i64,
            name: player.name.clone(),
            coins: player.coins,
            goods: player.goods,
        })
    }

    async fn create_batch(&self, players: &[NewPlayer]) -> Result<u64, ApplicationError> {
        if players.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<MySql>::new("INSERT INTO players (name, coins, goods) ");
        builder.push_values(players, |mut row, player| {
            row.push_bind(&player.name)
                .push_bind(player.coins)
                .push_bind(player.goods);
        });

        let mut tx_guard = self.tx.lock().await;
        let result = builder
            .build()
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(result.rows_affected())
    }

    async fn get_by_id(&self, player_id: i64) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let player = sqlx::query_as::<_, db_models::Player>(
            "SELECT id, name, coins, goods FROM players WHERE id = ?",
        )
        .bind(player_id)
        .fetch_one(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApplicationError::Db(DbError::PlayerNotFound(player_id)),
            e => ApplicationError::Db(DbError::Database(e)),
        })?;

        Ok(player.into())
    }

    async fn get_by_id_for_update(&self, player_id: i64) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        // Exclusive row lock, held until the surrounding transaction ends.
        let player = sqlx::query_as::<_, db_models::Player>(
            "SELECT id, name, coins, goods FROM players WHERE id = ? FOR UPDATE",
        )
        .bind(player_id)
        .fetch_one(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApplicationError::Db(DbError::PlayerNotFound(player_id)),
            e => ApplicationError::Db(DbError::Database(e)),
        })?;

        Ok(player.into())
    }

    async fn get_by_name(&self, name: &str) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let player = sqlx::query_as::<_, db_models::Player>(
            "SELECT id, name, coins, goods FROM players WHERE name = ?",
        )
        .bind(name)
        .fetch_one(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                ApplicationError::Db(DbError::PlayerByNameNotFound(name.to_string()))
            }
            e => ApplicationError::Db(DbError::Database(e)),
        })?;

        Ok(player.into())
    }

    async fn list_by_id_asc(&self, limit: i64) -> Result<Vec<Player>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let players = sqlx::query_as::<_, db_models::Player>(
            "SELECT id, name, coins, goods FROM players ORDER BY id LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(players.into_iter().map(|p| p.into()).collect())
    }

    async fn count(&self) -> Result<i64, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM players")
            .fetch_one(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(count)
    }

    async fn adjust_balances(
        &self,
        player_id: i64,
        coins_delta: i64,
        goods_delta: i64,
    ) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let result =
            sqlx::query("UPDATE players SET coins = coins + ?, goods = goods + ? WHERE id = ?")
                .bind(coins_delta)
                .bind(goods_delta)
                .bind(player_id)
                .execute(&mut *tx_guard.as_mut())
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::Db(DbError::PlayerNotFound(player_id)));
        }

        Ok(())
    }
}
