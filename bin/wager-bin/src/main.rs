mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use crate::cli::WagerCli;
use wager_api::{ApiService, AppState};
use wager_core::Engine;
use wager_db::{init_pool, run_migrations};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let WagerCli {
        database_url,
        api_host,
        api_port,
    } = WagerCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_name = "wager_ledger_api";
    let pool = init_pool(app_name, &database_url)?;
    run_migrations(&pool).await;

    let engine = Arc::new(Engine::new(pool.clone()));
    let app_state = AppState { pool, engine };

    ApiService::new(app_state, &api_host, api_port)
        .run_forever()
        .await
}
