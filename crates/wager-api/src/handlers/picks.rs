use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use diesel::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    AppState,
    dto::{
        ApiResponse, CreatePickRequest, FollowPickRequest, ListPicksQuery, PickFollowResponse,
        PickResponse, SettlePickRequest, UnfollowPickQuery,
    },
    errors::ApiError,
    helpers::{clamp_limit, resolve_user, viewer_tier},
};
use wager_core::odds;
use wager_db::WagerPool;
use wager_db::models::{NewPick, NewPickFollow, Pick, PickFollow};
use wager_db::types::{AccessTier, BetResult};

#[utoipa::path(
    post,
    path = "/picks",
    tag = "Picks",
    request_body = CreatePickRequest,
    responses(
        (status = 201, description = "Pick published", body = PickResponse),
        (status = 400, description = "Invalid odds or confidence")
    )
)]
pub async fn create_pick(
    State(state): State<AppState>,
    Json(req): Json<CreatePickRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Odds of 0 can never be graded, reject them at the door.
    odds::payout_ratio(req.odds_american)?;
    if let Some(confidence) = req.confidence {
        if !(1..=10).contains(&confidence) {
            return Err(ApiError::BadRequest(
                "confidence must be between 1 and 10".to_string(),
            ));
        }
    }

    let tier = viewer_tier(req.access_tier.as_deref());
    let capper = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let new_pick = NewPick {
        capper_id: capper.id,
        community_id: req.community_id,
        sport: req.sport,
        league: req.league,
        bet_type: req.bet_type,
        description: req.description,
        reasoning: req.reasoning,
        confidence: req.confidence,
        odds_american: req.odds_american,
        recommended_units: req.recommended_units,
        result: BetResult::Pending.as_str().to_string(),
        access_tier: tier.as_str().to_string(),
        price: req.price,
        is_premium: tier == AccessTier::Premium,
    };

    let pick = state
        .pool
        .interact_with_context("create pick".into(), move |conn| {
            Pick::create(&new_pick, conn)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PickResponse::from(pick))),
    ))
}

#[utoipa::path(
    get,
    path = "/picks",
    tag = "Picks",
    params(ListPicksQuery),
    responses(
        (status = 200, description = "Community pick feed, newest first", body = Vec<PickResponse>)
    )
)]
pub async fn list_picks(
    State(state): State<AppState>,
    Query(query): Query<ListPicksQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tier = viewer_tier(query.viewer_tier.as_deref());
    let limit = clamp_limit(query.limit, 50, 100);
    let community = query.community_id;
    let picks = state
        .pool
        .interact_with_context("list picks".into(), move |conn| {
            Pick::list(&community, query.capper_id, query.sport, tier, limit, conn)
        })
        .await?;

    let picks: Vec<PickResponse> = picks.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(picks)))
}

#[utoipa::path(
    post,
    path = "/picks/{pick_id}/settle",
    tag = "Picks",
    params(("pick_id" = Uuid, Path, description = "Pick identifier")),
    request_body = SettlePickRequest,
    responses(
        (status = 200, description = "Pick settled and cascaded to followers", body = PickResponse),
        (status = 403, description = "Caller is not the pick's capper"),
        (status = 404, description = "Pick not found in this community"),
        (status = 409, description = "Pick already settled")
    )
)]
pub async fn settle_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<Uuid>,
    Json(req): Json<SettlePickRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let pick = state
        .engine
        .settlement
        .settle_pick(
            pick_id,
            user.id,
            &req.community_id,
            req.result,
            req.actual_odds_american,
        )
        .await?;

    Ok(Json(ApiResponse::ok(PickResponse::from(pick))))
}

#[utoipa::path(
    post,
    path = "/picks/{pick_id}/follow",
    tag = "Picks",
    params(("pick_id" = Uuid, Path, description = "Pick identifier")),
    request_body = FollowPickRequest,
    responses(
        (status = 201, description = "Tail recorded", body = PickFollowResponse),
        (status = 400, description = "Invalid stake or self-follow"),
        (status = 404, description = "Pick not found in this community"),
        (status = 409, description = "Pick already settled or already followed")
    )
)]
pub async fn follow_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<Uuid>,
    Json(req): Json<FollowPickRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.stake <= Decimal::ZERO {
        return Err(ApiError::BadRequest("stake must be positive".to_string()));
    }

    let follower = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let community = req.community_id.clone();
    let pick = state
        .pool
        .interact_with_context("fetch pick to follow".into(), move |conn| {
            Pick::find_by_id_scoped(pick_id, &community, conn)
        })
        .await?;

    if pick.capper_id == follower.id {
        return Err(ApiError::BadRequest(
            "cappers cannot follow their own pick".to_string(),
        ));
    }
    if BetResult::parse(&pick.result).is_none_or(|result| result.is_terminal()) {
        return Err(ApiError::Conflict(
            "pick is already settled".to_string(),
        ));
    }

    let new_follow = NewPickFollow {
        pick_id,
        follower_id: follower.id,
        capper_id: pick.capper_id,
        community_id: req.community_id,
        stake: req.stake,
        odds_american: req.odds_american.unwrap_or(pick.odds_american),
        result: BetResult::Pending.as_str().to_string(),
    };

    // Follow row and counter move together; the unique (pick, follower)
    // index rejects double-follows.
    let follow = state
        .pool
        .interact_with_context("follow pick".into(), move |conn| {
            conn.transaction(|conn| {
                let follow = PickFollow::create(&new_follow, conn)?;
                Pick::adjust_follows(pick_id, 1, conn)?;
                Ok::<_, diesel::result::Error>(follow)
            })
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PickFollowResponse::from(follow))),
    ))
}

#[utoipa::path(
    delete,
    path = "/picks/{pick_id}/follow",
    tag = "Picks",
    params(
        ("pick_id" = Uuid, Path, description = "Pick identifier"),
        UnfollowPickQuery
    ),
    responses(
        (status = 200, description = "Tail removed"),
        (status = 404, description = "No follow recorded for this caller")
    )
)]
pub async fn unfollow_pick(
    State(state): State<AppState>,
    Path(pick_id): Path<Uuid>,
    Query(query): Query<UnfollowPickQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let follower = resolve_user(&state.pool, &query.external_user_id, &query.community_id).await?;
    let deleted = state
        .pool
        .interact_with_context("unfollow pick".into(), move |conn| {
            conn.transaction(|conn| {
                let deleted = PickFollow::delete(pick_id, follower.id, conn)?;
                if deleted > 0 {
                    Pick::adjust_follows(pick_id, -1, conn)?;
                }
                Ok::<_, diesel::result::Error>(deleted)
            })
        })
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound(
            "no follow recorded for this pick".to_string(),
        ));
    }
    Ok(Json(ApiResponse::ok(())))
}
