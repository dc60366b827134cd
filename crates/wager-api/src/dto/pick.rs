use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use wager_db::models::{Pick, PickFollow};
use wager_db::types::BetResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePickRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub sport: String,
    pub league: Option<String>,
    pub bet_type: String,
    pub description: String,
    pub reasoning: Option<String>,
    pub confidence: Option<i32>,
    pub odds_american: i32,
    pub recommended_units: Option<Decimal>,
    /// "public" or "premium"; defaults to public.
    pub access_tier: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SettlePickRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub result: BetResult,
    /// Closing line, when it moved from the posted odds.
    pub actual_odds_american: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FollowPickRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub stake: Decimal,
    /// The follower's own odds; defaults to the pick's posted odds.
    pub odds_american: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UnfollowPickQuery {
    pub external_user_id: String,
    pub community_id: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListPicksQuery {
    pub community_id: String,
    pub capper_id: Option<Uuid>,
    pub sport: Option<String>,
    /// Viewer's access tier; anything but "premium" sees public picks only.
    pub viewer_tier: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PickResponse {
    pub id: Uuid,
    pub capper_id: Uuid,
    pub sport: String,
    pub league: Option<String>,
    pub bet_type: String,
    pub description: String,
    pub reasoning: Option<String>,
    pub confidence: Option<i32>,
    pub odds_american: i32,
    pub actual_odds_american: Option<i32>,
    pub recommended_units: Option<Decimal>,
    pub result: String,
    pub roi: Decimal,
    pub access_tier: String,
    pub price: Option<Decimal>,
    pub is_premium: bool,
    pub views: i32,
    pub follows: i32,
    pub posted_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl From<Pick> for PickResponse {
    fn from(pick: Pick) -> Self {
        Self {
            id: pick.id,
            capper_id: pick.capper_id,
            sport: pick.sport,
            league: pick.league,
            bet_type: pick.bet_type,
            description: pick.description,
            reasoning: pick.reasoning,
            confidence: pick.confidence,
            odds_american: pick.odds_american,
            actual_odds_american: pick.actual_odds_american,
            recommended_units: pick.recommended_units,
            result: pick.result,
            roi: pick.roi,
            access_tier: pick.access_tier,
            price: pick.price,
            is_premium: pick.is_premium,
            views: pick.views,
            follows: pick.follows,
            posted_at: pick.posted_at,
            settled_at: pick.settled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PickFollowResponse {
    pub id: Uuid,
    pub pick_id: Uuid,
    pub follower_id: Uuid,
    pub stake: Decimal,
    pub odds_american: i32,
    pub result: String,
    pub profit_loss: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<PickFollow> for PickFollowResponse {
    fn from(follow: PickFollow) -> Self {
        Self {
            id: follow.id,
            pick_id: follow.pick_id,
            follower_id: follow.follower_id,
            stake: follow.stake,
            odds_american: follow.odds_american,
            result: follow.result,
            profit_loss: follow.profit_loss,
            created_at: follow.created_at,
        }
    }
}
