//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server exposes the tool catalog and converters, the AI flows, and the
//! per-user document store under `/api`. The auth gate runs in the client;
//! nothing here inspects who is calling, so `/api/users/{user_id}/...` must
//! sit behind whatever identity check the deployment fronts it with.

pub mod data;
pub mod flows;
pub mod tools;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/tools", get(tools::list_tools))
        .route("/api/tools/convert", post(tools::convert_units))
        .route("/api/tools/random", post(tools::random_number))
        .route("/api/tools/{id}", get(tools::get_tool))
        .route("/api/flows/{flow}", post(flows::run_flow))
        .route(
            "/api/users/{user_id}/data/{*path}",
            get(data::get_data).put(data::put_data),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
