pub mod bankroll;
pub mod bet;
pub mod pick;
pub mod pick_follow;
pub mod transaction;
pub mod user;
pub mod user_stat;

pub use bankroll::{Bankroll, NewBankroll};
pub use bet::{Bet, NewBet};
pub use pick::{NewPick, Pick};
pub use pick_follow::{NewPickFollow, PickFollow};
pub use transaction::{NewTransaction, Transaction};
pub use user::{NewUser, User};
pub use user_stat::{NewUserStats, UserStats};
