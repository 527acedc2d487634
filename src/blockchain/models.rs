// src/blockchain/models.rs
use serde_json::Value;
use thiserror::Error;

use crate::blockchain::block_id::CanonicalBlockId;

// --- Error types for remote node calls ---

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RPC: {method} request failed: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("RPC: {method} returned HTTP {status}: {body}")]
    Http {
        method: String,
        status: u16,
        body: String,
    },
    #[error("RPC: {method} failed with {code}: {message}{}", format_error_data(.data))]
    Rpc {
        method: String,
        code: i32,
        message: String,
        data: Option<Value>,
    },
    #[error("RPC: {method} returned a malformed reply: {reason}")]
    MalformedReply { method: String, reason: String },
    #[error("Unsupported block identifier: {0}")]
    UnsupportedBlockId(String),
}

fn format_error_data(data: &Option<Value>) -> String {
    match data {
        Some(Value::String(s)) => format!(" ({})", s),
        Some(other) => format!(" ({})", other),
        None => String::new(),
    }
}

// --- Call models handed to the remote client ---

/// A read-only contract call, addressed the way the Starknet client expects it.
///
/// `entry_point` is either a selector felt or a plain function name; the client
/// turns names into selectors before sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub contract_address: String,
    pub entry_point: String,
    pub calldata: Vec<String>,
}

/// Event filter with its block bounds already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub from_block: Option<CanonicalBlockId>,
    pub to_block: Option<CanonicalBlockId>,
    pub address: Option<String>,
    pub keys: Option<Vec<Vec<String>>>,
    pub chunk_size: u64,
    pub continuation_token: Option<String>,
}

/// Returns true for a `0x`-prefixed hex string of 1 to 64 digits (a felt).
pub fn is_felt(value: &str) -> bool {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) => {
            !digits.is_empty() && digits.len() <= 64 && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
