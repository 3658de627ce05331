use bazaar_types::common::Player;

use crate::cqrs::Query;

/// Fetch a player by unique name.
pub struct GetPlayerByName {
    pub name: String,
}

impl Query for GetPlayerByName {
    type Output = Player;
}

/// Fetch a player by id.
pub struct GetPlayerById {
    pub id: i64,
}

impl Query for GetPlayerById {
    type Output = Player;
}

/// Count all registered players.
pub struct CountPlayers {}

impl Query for CountPlayers {
    type Output = i64;
}

/// List the first `limit` players by ascending id.
pub struct ListPlayers {
    pub limit: i64,
}

impl Query for ListPlayers {
    type Output = Vec<Player>;
}
