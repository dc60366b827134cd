pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod helpers;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use deadpool_diesel::postgres::Pool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use wager_core::Engine;

use docs::ApiDoc;
use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub engine: Arc<Engine>,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }

    /// Serve until interrupted. Ctrl-C drains in-flight requests before the
    /// process exits.
    pub async fn run_forever(self) -> anyhow::Result<()> {
        ApiDoc::generate_openapi_json("./".into())?;

        let address = format!("{}:{}", self.host, self.port);
        let socket_addr: SocketAddr = address.parse()?;
        let listener = TcpListener::bind(socket_addr).await?;

        let app = api_router::<ApiDoc>(self.state.clone())
            .with_state(self.state)
            .layer(CorsLayer::permissive());

        tracing::info!("API started at http://{socket_addr}");

        let shutdown = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for shutdown signal");
            tracing::info!("Shutdown signal received, draining connections");
        };

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .context("API server stopped!")
    }
}
