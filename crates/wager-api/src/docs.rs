use anyhow::Result;
use serde_json::to_string_pretty;
use std::path::PathBuf;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::{ServerBuilder, ServerVariableBuilder};

use crate::dto;
use crate::handlers;

pub struct ServerAddon;

impl Modify for ServerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let server_variable = ServerVariableBuilder::new()
            .default_value("staging")
            .enum_values(Some(vec!["staging", "production"]))
            .build();
        openapi.servers = Some(vec![
            ServerBuilder::new()
                .url("https://{environment}.wagerline.dev/api/v1")
                .parameter("environment", server_variable)
                .build(),
        ]);
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&ServerAddon),
    paths(
        handlers::bets::create_bet,
        handlers::bets::list_bets,
        handlers::bets::settle_bet,
        handlers::picks::create_pick,
        handlers::picks::list_picks,
        handlers::picks::settle_pick,
        handlers::picks::follow_pick,
        handlers::picks::unfollow_pick,
        handlers::bankrolls::open_bankroll,
        handlers::bankrolls::list_bankrolls,
        handlers::bankrolls::record_transaction,
        handlers::bankrolls::list_transactions,
        handlers::stats::get_stats,
        handlers::leaderboard::get_leaderboard,
    ),
    components(schemas(
        dto::CreateBetRequest,
        dto::SettleBetRequest,
        dto::BetResponse,
        dto::CreatePickRequest,
        dto::SettlePickRequest,
        dto::FollowPickRequest,
        dto::PickResponse,
        dto::PickFollowResponse,
        dto::OpenBankrollRequest,
        dto::RecordTransactionRequest,
        dto::BankrollResponse,
        dto::TransactionResponse,
        dto::UserStatsResponse,
        dto::LeaderboardResponse,
        wager_core::leaderboard::RankedEntry,
        wager_db::types::BetResult,
        wager_db::types::Timeframe,
    )),
    tags(
        (name = "Bets", description = "Personal bet tracking and settlement"),
        (name = "Picks", description = "Capper picks and follower tails"),
        (name = "Bankrolls", description = "Bankroll ledger endpoints"),
        (name = "Stats", description = "Derived user statistics"),
        (name = "Leaderboard", description = "Cached community rankings"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn generate_openapi_json(output_path: PathBuf) -> Result<()> {
        let openapi = Self::openapi();
        let json = to_string_pretty(&openapi)?;

        let file_path = output_path.join("openapi.json");

        tracing::info!("Saving OpenAPI specs to {}...", file_path.display());

        std::fs::write(&file_path, json)?;
        tracing::info!("OpenAPI specs saved!");
        Ok(())
    }
}
