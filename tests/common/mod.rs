//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use starknet_mcp_server::{
    blockchain::{
        block_id::CanonicalBlockId,
        client::StarknetRpc,
        models::{ClientError, EventFilter, FunctionCall},
    },
    config::Config,
    AppState,
};

/// Answers every node call with the same canned reply and counts the calls.
pub struct CannedClient {
    reply: Result<Value, (i32, String)>,
    calls: AtomicUsize,
}

impl CannedClient {
    pub fn ok(value: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(value),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn rpc_error(code: i32, message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((code, message.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, method: &str) -> Result<Value, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err((code, message)) => Err(ClientError::Rpc {
                method: method.to_string(),
                code: *code,
                message: message.clone(),
                data: None,
            }),
        }
    }
}

#[async_trait]
impl StarknetRpc for CannedClient {
    async fn spec_version(&self) -> Result<Value, ClientError> {
        self.answer("starknet_specVersion")
    }
    async fn get_block_with_tx_hashes(&self, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getBlockWithTxHashes")
    }
    async fn get_block_with_txs(&self, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getBlockWithTxs")
    }
    async fn get_block_with_receipts(&self, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getBlockWithReceipts")
    }
    async fn get_state_update(&self, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getStateUpdate")
    }
    async fn get_storage_at(&self, _: String, _: String, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getStorageAt")
    }
    async fn get_transaction_status(&self, _: String) -> Result<Value, ClientError> {
        self.answer("starknet_getTransactionStatus")
    }
    async fn get_transaction_by_hash(&self, _: String) -> Result<Value, ClientError> {
        self.answer("starknet_getTransactionByHash")
    }
    async fn get_transaction_by_block_id_and_index(&self, _: CanonicalBlockId, _: u64) -> Result<Value, ClientError> {
        self.answer("starknet_getTransactionByBlockIdAndIndex")
    }
    async fn get_transaction_receipt(&self, _: String) -> Result<Value, ClientError> {
        self.answer("starknet_getTransactionReceipt")
    }
    async fn get_class(&self, _: String, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getClass")
    }
    async fn get_class_hash_at(&self, _: String, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getClassHashAt")
    }
    async fn get_class_at(&self, _: String, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getClassAt")
    }
    async fn get_block_transaction_count(&self, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getBlockTransactionCount")
    }
    async fn call_contract(&self, _: FunctionCall, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_call")
    }
    async fn get_events(&self, _: EventFilter) -> Result<Value, ClientError> {
        self.answer("starknet_getEvents")
    }
    async fn get_nonce_for_address(&self, _: String, _: CanonicalBlockId) -> Result<Value, ClientError> {
        self.answer("starknet_getNonce")
    }
    async fn get_block_number(&self) -> Result<Value, ClientError> {
        self.answer("starknet_blockNumber")
    }
    async fn get_block_latest_accepted(&self) -> Result<Value, ClientError> {
        self.answer("starknet_blockHashAndNumber")
    }
    async fn get_chain_id(&self) -> Result<Value, ClientError> {
        self.answer("starknet_chainId")
    }
    async fn get_syncing_stats(&self) -> Result<Value, ClientError> {
        self.answer("starknet_syncing")
    }
}

pub fn state_with(client: Arc<CannedClient>) -> AppState {
    AppState::new(Config::default(), client)
}
