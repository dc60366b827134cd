use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    AppState,
    dto::{ApiResponse, BetResponse, CreateBetRequest, ListBetsQuery, SettleBetRequest},
    errors::ApiError,
    helpers::resolve_user,
};
use wager_core::odds;
use wager_db::WagerPool;
use wager_db::models::{Bet, NewBet};
use wager_db::types::BetResult;

#[utoipa::path(
    post,
    path = "/bets",
    tag = "Bets",
    request_body = CreateBetRequest,
    responses(
        (status = 201, description = "Bet recorded", body = BetResponse),
        (status = 400, description = "Invalid stake or odds"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn create_bet(
    State(state): State<AppState>,
    Json(req): Json<CreateBetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.stake <= Decimal::ZERO {
        return Err(ApiError::BadRequest("stake must be positive".to_string()));
    }
    let potential_return = odds::potential_return(req.stake, req.odds_american)?;

    let user = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let new_bet = NewBet {
        user_id: user.id,
        community_id: req.community_id,
        sport: req.sport,
        bet_type: req.bet_type,
        description: req.description,
        odds_american: req.odds_american,
        stake: req.stake,
        potential_return,
        actual_return: Decimal::ZERO,
        result: BetResult::Pending.as_str().to_string(),
        sportsbook: req.sportsbook,
        game_date: req.game_date,
        notes: req.notes,
    };

    let bet = state
        .pool
        .interact_with_context("create bet".into(), move |conn| {
            Bet::create(&new_bet, conn)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(BetResponse::from(bet))),
    ))
}

#[utoipa::path(
    get,
    path = "/bets",
    tag = "Bets",
    params(ListBetsQuery),
    responses(
        (status = 200, description = "Caller's bets, newest first", body = Vec<BetResponse>)
    )
)]
pub async fn list_bets(
    State(state): State<AppState>,
    Query(query): Query<ListBetsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &query.external_user_id, &query.community_id).await?;
    let community = query.community_id;
    let bets = state
        .pool
        .interact_with_context("list bets".into(), move |conn| {
            Bet::find_by_user(user.id, &community, conn)
        })
        .await?;

    let bets: Vec<BetResponse> = bets.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(bets)))
}

#[utoipa::path(
    post,
    path = "/bets/{bet_id}/settle",
    tag = "Bets",
    params(("bet_id" = Uuid, Path, description = "Bet identifier")),
    request_body = SettleBetRequest,
    responses(
        (status = 200, description = "Bet settled", body = BetResponse),
        (status = 400, description = "Non-terminal result"),
        (status = 403, description = "Bet belongs to another user"),
        (status = 404, description = "Bet not found in this community"),
        (status = 409, description = "Bet already settled")
    )
)]
pub async fn settle_bet(
    State(state): State<AppState>,
    Path(bet_id): Path<Uuid>,
    Json(req): Json<SettleBetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let bet = state
        .engine
        .settlement
        .settle_bet(bet_id, user.id, &req.community_id, req.result)
        .await?;

    Ok(Json(ApiResponse::ok(BetResponse::from(bet))))
}
