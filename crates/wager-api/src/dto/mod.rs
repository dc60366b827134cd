pub mod bankroll;
pub mod bet;
pub mod leaderboard;
pub mod pick;
pub mod response;
pub mod stats;

pub use bankroll::*;
pub use bet::*;
pub use leaderboard::*;
pub use pick::*;
pub use response::*;
pub use stats::*;
