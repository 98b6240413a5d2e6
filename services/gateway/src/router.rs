use crate::handlers::{ledger, vault};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/deposit", post(vault::deposit))
        .route("/withdraw", post(vault::withdraw))
        .route("/vaults/{account_id}", get(vault::get_vault))
        .route("/accounts/me/released", get(vault::get_released))
        .route("/ledger", get(ledger::get_ledger));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
