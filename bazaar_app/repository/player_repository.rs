use bazaar_types::common::{NewPlayer, Player};
use bazaar_types::errors::ApplicationError;

/// Storage contract for players. Implementations run every operation inside
/// the unit of work's transaction.
#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Inserts a player; the storage layer assigns the id.
    async fn create(&self, player: &NewPlayer) -> Result<Player, ApplicationError>;

    /// Inserts a batch of players with a single statement, returning the
    /// number of inserted rows.
    async fn create_batch(&self, players: &[NewPlayer]) -> Result<u64, ApplicationError>;

    /// Returns a player by id.
    async fn get_by_id(&self, player_id: i64) -> Result<Player, ApplicationError>;

    /// Returns a player by id, holding an exclusive row lock until the
    /// transaction ends. Other locking reads of the same row block until
    /// then.
    async fn get_by_id_for_update(&self, player_id: i64) -> Result<Player, ApplicationError>;

    /// Returns a player by unique name.
    async fn get_by_name(&self, name: &str) -> Result<Player, ApplicationError>;

    /// Lists players ordered by ascending id.
    async fn list_by_id_asc(&self, limit: i64) -> Result<Vec<Player>, ApplicationError>;

    /// Counts all players.
    async fn count(&self) -> Result<i64, ApplicationError>;

    /// Applies relative deltas to a player's balances.
    async fn adjust_balances(
        &self,
        player_id: i64,
        coins_delta: i64,
        goods_delta: i64,
    ) -> Result<(), ApplicationError>;
}
