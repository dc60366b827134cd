use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    AppState,
    dto::{ApiResponse, StatsQuery, UserStatsResponse},
    errors::ApiError,
    helpers::resolve_user,
};
use wager_db::WagerPool;
use wager_db::models::UserStats;

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Caller's aggregate record; all zeros before the first settled bet", body = UserStatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &query.external_user_id, &query.community_id).await?;
    let community = query.community_id;
    let stats = state
        .pool
        .interact_with_context("fetch user stats".into(), move |conn| {
            UserStats::find_by_user(user.id, &community, conn)
        })
        .await;

    let response = match stats {
        Ok(stats) => UserStatsResponse::from(stats),
        Err(e) if e.is_not_found() => UserStatsResponse::zeroed(user.id, Utc::now()),
        Err(e) => return Err(e.into()),
    };
    Ok(Json(ApiResponse::ok(response)))
}
