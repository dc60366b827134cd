use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use wager_db::models::UserStats;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StatsQuery {
    pub external_user_id: String,
    pub community_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStatsResponse {
    pub user_id: Uuid,
    pub total_bets: i32,
    pub wins: i32,
    pub losses: i32,
    pub pushes: i32,
    pub pending: i32,
    pub win_rate: Decimal,
    pub roi: Decimal,
    pub net_profit: Decimal,
    pub current_streak: i32,
    pub units_won: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl UserStatsResponse {
    /// A user with no settled history reads as all zeros, never as missing.
    pub fn zeroed(user_id: Uuid, as_of: DateTime<Utc>) -> Self {
        Self {
            user_id,
            total_bets: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            pending: 0,
            win_rate: Decimal::ZERO,
            roi: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            current_streak: 0,
            units_won: Decimal::ZERO,
            updated_at: as_of,
        }
    }
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            user_id: stats.user_id,
            total_bets: stats.total_bets,
            wins: stats.wins,
            losses: stats.losses,
            pushes: stats.pushes,
            pending: stats.pending,
            win_rate: stats.win_rate,
            roi: stats.roi,
            net_profit: stats.net_profit,
            current_streak: stats.current_streak,
            units_won: stats.units_won,
            updated_at: stats.updated_at,
        }
    }
}
