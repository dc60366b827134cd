use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use wager_db::models::Bet;
use wager_db::types::BetResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBetRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub sport: String,
    pub bet_type: String,
    pub description: String,
    pub odds_american: i32,
    pub stake: Decimal,
    pub sportsbook: Option<String>,
    pub game_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SettleBetRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub result: BetResult,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListBetsQuery {
    pub external_user_id: String,
    pub community_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BetResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sport: String,
    pub bet_type: String,
    pub description: String,
    pub odds_american: i32,
    pub stake: Decimal,
    pub potential_return: Decimal,
    pub actual_return: Decimal,
    pub result: String,
    pub sportsbook: Option<String>,
    pub game_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl From<Bet> for BetResponse {
    fn from(bet: Bet) -> Self {
        Self {
            id: bet.id,
            user_id: bet.user_id,
            sport: bet.sport,
            bet_type: bet.bet_type,
            description: bet.description,
            odds_american: bet.odds_american,
            stake: bet.stake,
            potential_return: bet.potential_return,
            actual_return: bet.actual_return,
            result: bet.result,
            sportsbook: bet.sportsbook,
            game_date: bet.game_date,
            notes: bet.notes,
            created_at: bet.created_at,
            settled_at: bet.settled_at,
        }
    }
}
