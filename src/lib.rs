// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod mcp;

use blockchain::client::StarknetRpc;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Starknet node client, shared read-only by every request
    pub starknet: Arc<dyn StarknetRpc>,
}

impl AppState {
    pub fn new(config: config::Config, starknet: Arc<dyn StarknetRpc>) -> Self {
        Self { config, starknet }
    }
}
