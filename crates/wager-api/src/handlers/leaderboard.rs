use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    AppState,
    dto::{ApiResponse, LeaderboardQuery, LeaderboardResponse},
    errors::ApiError,
    helpers::clamp_limit,
};
use wager_db::types::Timeframe;

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Community ranking, best ROI first", body = LeaderboardResponse)
    )
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let timeframe = Timeframe::parse_or_default(query.timeframe.as_deref().unwrap_or_default());
    let limit = clamp_limit(query.limit, 50, 100);
    let view = state
        .engine
        .leaderboard
        .get_leaderboard(
            &query.community_id,
            timeframe,
            query.sport,
            query.bet_type,
            limit,
        )
        .await?;

    Ok(Json(ApiResponse::ok(LeaderboardResponse::from_view(
        timeframe, view,
    ))))
}
