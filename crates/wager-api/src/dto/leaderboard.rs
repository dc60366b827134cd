use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use wager_core::leaderboard::RankedEntry;
use wager_core::LeaderboardView;
use wager_db::types::Timeframe;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    pub community_id: String,
    /// "daily", "weekly", "monthly" or "all_time"; defaults to monthly.
    pub timeframe: Option<String>,
    pub sport: Option<String>,
    pub bet_type: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub timeframe: Timeframe,
    pub cached: bool,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RankedEntry>,
}

impl LeaderboardResponse {
    pub fn from_view(timeframe: Timeframe, view: LeaderboardView) -> Self {
        Self {
            timeframe,
            cached: view.cached,
            generated_at: view.snapshot.generated_at,
            entries: view.snapshot.entries.clone(),
        }
    }
}
