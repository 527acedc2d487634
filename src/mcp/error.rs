// src/mcp/error.rs

use thiserror::Error;

use crate::blockchain::{block_id::InvalidBlockId, models::ClientError};
use crate::mcp::methods::RpcMethod;

/// Every way a tool invocation can fail. The envelope only ever shows the message.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("Invalid arguments for {method}: {reason}")]
    Validation { method: RpcMethod, reason: String },
    #[error(transparent)]
    InvalidBlockId(#[from] InvalidBlockId),
    #[error(transparent)]
    Remote(#[from] ClientError),
}

impl AdapterError {
    pub fn validation(method: RpcMethod, reason: impl Into<String>) -> Self {
        AdapterError::Validation {
            method,
            reason: reason.into(),
        }
    }
}
