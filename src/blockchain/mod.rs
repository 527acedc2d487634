// src/blockchain/mod.rs

pub mod block_id;
pub mod client;
pub mod models;
pub mod selector;

// Re-export commonly used types
pub use block_id::{resolve_block_id, BlockReference, CanonicalBlockId};
pub use client::{StarknetClient, StarknetRpc};
pub use models::ClientError;
