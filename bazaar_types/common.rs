use serde::{Deserialize, Serialize};
use std::fmt;

/// A market participant holding a coin balance and a goods inventory.
///
/// Both balances stay non-negative: the trade handler checks them under row
/// locks before applying any mutation, so no committed state ever shows a
/// negative value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub coins: i64,
    pub goods: i64,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player(name={}, coins={}, goods={})",
            self.name, self.coins, self.goods
        )
    }
}

/// A player that hasn't been persisted yet. The storage layer assigns the id
/// on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub coins: i64,
    pub goods: i64,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, coins: i64, goods: i64) -> Self {
        Self {
            name: name.into(),
            coins,
            goods,
        }
    }
}
