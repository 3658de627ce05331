use crate::cqrs::Command;

/// Registers a single player with a starting balance.
#[derive(Debug, Clone)]
pub struct RegisterPlayer {
    pub name: String,
    pub coins: i64,
    pub goods: i64,
}

impl Command for RegisterPlayer {}

/// Inserts `count` players named `{prefix}_{i}`, `batch_size` rows per
/// insert statement.
#[derive(Debug, Clone)]
pub struct SeedPlayers {
    pub prefix: String,
    pub count: u32,
    pub coins: i64,
    pub goods: i64,
    pub batch_size: usize,
}

impl Command for SeedPlayers {}

/// Transfers `amount` goods from the seller to the buyer in exchange for
/// `price` coins.
#[derive(Debug, Clone)]
pub struct TradeGoods {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount: i64,
    pub price: i64,
}

impl Command for TradeGoods {}
