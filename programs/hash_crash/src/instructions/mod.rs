pub mod cancel_bet;
pub mod cash_out;
pub mod deposit_liquidity;
pub mod init_game;
pub mod init_house_vault;
pub mod place_bet;
pub mod queries;
pub mod reveal;
pub mod set_active;
pub mod set_loot_table;
pub mod update_bet;
pub mod update_config;
pub mod withdraw_liquidity;

pub use cancel_bet::*;
pub use cash_out::*;
pub use deposit_liquidity::*;
pub use init_game::*;
pub use init_house_vault::*;
pub use place_bet::*;
pub use queries::*;
pub use reveal::*;
pub use set_active::*;
pub use set_loot_table::*;
pub use update_bet::*;
pub use update_config::*;
pub use withdraw_liquidity::*;
