pub mod bankrolls;
pub mod bets;
pub mod leaderboard;
pub mod picks;
pub mod stats;

pub use bankrolls::*;
pub use bets::*;
pub use leaderboard::*;
pub use picks::*;
pub use stats::*;
