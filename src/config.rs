// src/config.rs

use std::env;

use anyhow::{Context, Result};
use url::Url;

/// Public mainnet endpoint used when `STARKNET_RPC_URL` is not set.
pub const DEFAULT_RPC_URL: &str = "https://starknet-mainnet.public.blastapi.io/rpc/v0_7";

const DEFAULT_PORT: u16 = 8080;

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,

    /// JSON-RPC endpoint of the Starknet node every tool call is forwarded to
    pub starknet_rpc_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            starknet_rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        let starknet_rpc_url = env::var("STARKNET_RPC_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        Url::parse(&starknet_rpc_url)
            .with_context(|| format!("STARKNET_RPC_URL is not a valid URL: {}", starknet_rpc_url))?;

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .context("PORT must be a valid number")?,
            starknet_rpc_url,
        })
    }
}
