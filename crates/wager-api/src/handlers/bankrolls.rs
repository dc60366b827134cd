use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    dto::{
        ApiResponse, BankrollResponse, ListBankrollsQuery, ListTransactionsQuery,
        OpenBankrollRequest, RecordTransactionRequest, TransactionResponse,
    },
    errors::ApiError,
    helpers::{clamp_limit, resolve_user},
};
use wager_core::OpenBankroll;
use wager_db::WagerPool;
use wager_db::models::{Bankroll, Transaction};
use wager_db::types::TransactionKind;

#[utoipa::path(
    post,
    path = "/bankrolls",
    tag = "Bankrolls",
    request_body = OpenBankrollRequest,
    responses(
        (status = 201, description = "Bankroll opened", body = BankrollResponse),
        (status = 400, description = "Non-positive starting amount")
    )
)]
pub async fn open_bankroll(
    State(state): State<AppState>,
    Json(req): Json<OpenBankrollRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let bankroll = state
        .engine
        .ledger
        .open_bankroll(
            user.id,
            &req.community_id,
            OpenBankroll {
                name: req.name,
                currency: req.currency,
                sport: req.sport,
                sportsbook: req.sportsbook,
                starting_amount: req.starting_amount,
                max_bet_percentage: req.max_bet_percentage,
                stop_loss_threshold: req.stop_loss_threshold,
                target_profit: req.target_profit,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(BankrollResponse::from(bankroll))),
    ))
}

#[utoipa::path(
    get,
    path = "/bankrolls",
    tag = "Bankrolls",
    params(ListBankrollsQuery),
    responses(
        (status = 200, description = "Caller's active bankrolls", body = Vec<BankrollResponse>)
    )
)]
pub async fn list_bankrolls(
    State(state): State<AppState>,
    Query(query): Query<ListBankrollsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &query.external_user_id, &query.community_id).await?;
    let bankrolls = state
        .pool
        .interact_with_context("list bankrolls".into(), move |conn| {
            Bankroll::find_active_by_user(user.id, conn)
        })
        .await?;

    let bankrolls: Vec<BankrollResponse> = bankrolls.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(bankrolls)))
}

#[utoipa::path(
    post,
    path = "/transactions",
    tag = "Bankrolls",
    request_body = RecordTransactionRequest,
    responses(
        (status = 201, description = "Ledger entry appended", body = TransactionResponse),
        (status = 400, description = "Invalid kind or non-positive amount"),
        (status = 404, description = "Bankroll not found for this caller")
    )
)]
pub async fn record_transaction(
    State(state): State<AppState>,
    Json(req): Json<RecordTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(kind) = TransactionKind::parse(&req.kind) else {
        return Err(ApiError::BadRequest(format!(
            "unknown transaction kind '{}'",
            req.kind
        )));
    };

    let user = resolve_user(&state.pool, &req.external_user_id, &req.community_id).await?;
    let entry = state
        .engine
        .ledger
        .record_transaction(
            user.id,
            &req.community_id,
            req.bankroll_id,
            kind,
            req.amount,
            req.description,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TransactionResponse::from(entry))),
    ))
}

#[utoipa::path(
    get,
    path = "/transactions",
    tag = "Bankrolls",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Caller's ledger entries, newest first", body = Vec<TransactionResponse>)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = resolve_user(&state.pool, &query.external_user_id, &query.community_id).await?;
    let limit = clamp_limit(query.limit, 100, 500);
    let entries = state
        .pool
        .interact_with_context("list transactions".into(), move |conn| {
            Transaction::find_by_user(user.id, query.bankroll_id, limit, conn)
        })
        .await?;

    let entries: Vec<TransactionResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(entries)))
}
