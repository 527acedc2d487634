//! # API Module
//!
//! HTTP transport for the Starknet MCP server.
//!
//! ## Available Endpoints
//! - `GET /api/health` - Liveness check
//! - `GET /api/tools` - The tool catalog, as served by `tools/list`
//! - `POST /api/rpc` - JSON-RPC endpoint for MCP requests

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod rpc;

/// Builds the full HTTP application, with every route nested under `/api`.
pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/tools", get(rpc::tools_handler))
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
