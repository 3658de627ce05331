mod count_players;
mod get_player_by_id;
mod get_player_by_name;
mod list_players;

pub use count_players::*;
pub use get_player_by_id::*;
pub use get_player_by_name::*;
pub use list_players::*;
