//! Core engine for the wager ledger and statistics service: odds math,
//! bankroll accounting, derived user statistics, settlement coordination and
//! the cached community leaderboard. Everything here is tenant-scoped by
//! `community_id` and persistence-backed through the shared pool.

pub mod error;
pub mod leaderboard;
pub mod ledger;
pub mod odds;
pub mod settlement;
pub mod stats;

use std::sync::Arc;

use deadpool_diesel::postgres::Pool;

pub use error::EngineError;
pub use leaderboard::{LeaderboardRanker, LeaderboardView, RankedEntry};
pub use ledger::{BankrollLedger, OpenBankroll, ReplayReport};
pub use settlement::SettlementCoordinator;
pub use stats::{StatsAggregator, StatsSnapshot};

/// All engine components wired over one shared pool. Components are cheap
/// handles; the engine itself is built once at startup and shared behind an
/// `Arc` by the API layer.
pub struct Engine {
    pub stats: Arc<StatsAggregator>,
    pub ledger: Arc<BankrollLedger>,
    pub settlement: SettlementCoordinator,
    pub leaderboard: LeaderboardRanker,
}

impl Engine {
    pub fn new(pool: Pool) -> Self {
        let stats = Arc::new(StatsAggregator::new(pool.clone()));
        let ledger = Arc::new(BankrollLedger::new(pool.clone()));
        let settlement = SettlementCoordinator::new(pool.clone(), stats.clone(), ledger.clone());
        let leaderboard = LeaderboardRanker::new(pool);
        Self {
            stats,
            ledger,
            settlement,
            leaderboard,
        }
    }
}
