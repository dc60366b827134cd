use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, handlers};

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();

    let bets_router = Router::new()
        .route("/", post(handlers::create_bet).get(handlers::list_bets))
        .route("/{bet_id}/settle", post(handlers::settle_bet));

    let picks_router = Router::new()
        .route("/", post(handlers::create_pick).get(handlers::list_picks))
        .route("/{pick_id}/settle", post(handlers::settle_pick))
        .route(
            "/{pick_id}/follow",
            post(handlers::follow_pick).delete(handlers::unfollow_pick),
        );

    let bankrolls_router = Router::new().route(
        "/",
        post(handlers::open_bankroll).get(handlers::list_bankrolls),
    );

    let transactions_router = Router::new().route(
        "/",
        post(handlers::record_transaction).get(handlers::list_transactions),
    );

    Router::new()
        .route("/health", get(health))
        .nest("/v1/bets", bets_router)
        .nest("/v1/picks", picks_router)
        .nest("/v1/bankrolls", bankrolls_router)
        .nest("/v1/transactions", transactions_router)
        .route("/v1/stats", get(handlers::get_stats))
        .route("/v1/leaderboard", get(handlers::get_leaderboard))
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
