use sqlx::FromRow;

use bazaar_types::common;

#[derive(Debug, Clone, FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub coins: i64,
    pub goods: i64,
}

impl From<Player> for common::Player {
    fn from(row: Player) -> Self {
        common::Player {
            id: row.id,
            name: row.name,
            coins: row.coins,
            goods: row.goods,
        }
    }
}
