mod register_player;
mod seed_players;
mod trade_goods;

pub use register_player::*;
pub use seed_players::*;
pub use trade_goods::*;
