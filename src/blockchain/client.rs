//! Blockchain client module for Starknet JSON-RPC nodes.
//!
//! `StarknetRpc` is the seam between the tool layer and the node: one async
//! method per read operation, taking already-resolved arguments. The production
//! implementation, `StarknetClient`, speaks JSON-RPC 2.0 over HTTP with named
//! params.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::debug;
use url::Url;

use crate::blockchain::{
    block_id::{CanonicalBlockId, BLOCK_TAGS},
    models::{ClientError, EventFilter, FunctionCall},
    selector::resolve_selector,
};
use crate::mcp::protocol::{Request, Response};

/// Read interface of a Starknet node.
#[async_trait]
pub trait StarknetRpc: Send + Sync {
    async fn spec_version(&self) -> Result<Value, ClientError>;

    async fn get_block_with_tx_hashes(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn get_block_with_txs(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn get_block_with_receipts(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn get_state_update(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn get_storage_at(
        &self,
        contract_address: String,
        key: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError>;

    async fn get_transaction_status(&self, transaction_hash: String) -> Result<Value, ClientError>;

    async fn get_transaction_by_hash(&self, transaction_hash: String) -> Result<Value, ClientError>;

    async fn get_transaction_by_block_id_and_index(
        &self,
        block_id: CanonicalBlockId,
        index: u64,
    ) -> Result<Value, ClientError>;

    async fn get_transaction_receipt(&self, transaction_hash: String) -> Result<Value, ClientError>;

    async fn get_class(&self, class_hash: String, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn get_class_hash_at(
        &self,
        contract_address: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError>;

    async fn get_class_at(
        &self,
        contract_address: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError>;

    async fn get_block_transaction_count(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn call_contract(&self, call: FunctionCall, block_id: CanonicalBlockId) -> Result<Value, ClientError>;

    async fn get_events(&self, filter: EventFilter) -> Result<Value, ClientError>;

    async fn get_nonce_for_address(
        &self,
        contract_address: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError>;

    async fn get_block_number(&self) -> Result<Value, ClientError>;

    async fn get_block_latest_accepted(&self) -> Result<Value, ClientError>;

    async fn get_chain_id(&self) -> Result<Value, ClientError>;

    async fn get_syncing_stats(&self) -> Result<Value, ClientError>;
}

/// JSON-RPC client for a single Starknet node.
pub struct StarknetClient {
    http: Client,
    url: Url,
    next_id: AtomicU64,
}

impl StarknetClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url).with_context(|| format!("Invalid Starknet RPC URL: {}", rpc_url))?;
        Ok(Self {
            http: Client::new(),
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = Request {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: method.to_string(),
            params: Some(params),
        };
        debug!("RPC request {} #{}", method, id);

        let res = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                method: method.to_string(),
                source,
            })?;
        let status = res.status();
        let text = res.text().await.map_err(|source| ClientError::Transport {
            method: method.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(ClientError::Http {
                method: method.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: Response = serde_json::from_str(&text).map_err(|e| ClientError::MalformedReply {
            method: method.to_string(),
            reason: e.to_string(),
        })?;
        if let Some(err) = reply.error {
            return Err(ClientError::Rpc {
                method: method.to_string(),
                code: err.code,
                message: err.message,
                data: err.data,
            });
        }
        reply.result.ok_or_else(|| ClientError::MalformedReply {
            method: method.to_string(),
            reason: "reply carries neither result nor error".to_string(),
        })
    }

    async fn block_request(&self, method: &str, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        let params = json!({ "block_id": block_id_param(&block_id)? });
        self.request(method, params).await
    }
}

/// Converts a canonical block id into the `BLOCK_ID` wire shape.
pub fn block_id_param(block_id: &CanonicalBlockId) -> Result<Value, ClientError> {
    match block_id {
        CanonicalBlockId::Number(number) => Ok(json!({ "block_number": number })),
        CanonicalBlockId::Id(id) if BLOCK_TAGS.contains(&id.as_str()) => Ok(json!(id)),
        CanonicalBlockId::Id(id) if id.starts_with("0x") || id.starts_with("0X") => {
            Ok(json!({ "block_hash": id }))
        }
        CanonicalBlockId::Id(id) => match id.parse::<u64>() {
            Ok(number) => Ok(json!({ "block_number": number })),
            Err(_) => Err(ClientError::UnsupportedBlockId(id.clone())),
        },
    }
}

fn event_filter_param(filter: &EventFilter) -> Result<Value, ClientError> {
    let mut fields = Map::new();
    if let Some(from_block) = &filter.from_block {
        fields.insert("from_block".into(), block_id_param(from_block)?);
    }
    if let Some(to_block) = &filter.to_block {
        fields.insert("to_block".into(), block_id_param(to_block)?);
    }
    if let Some(address) = &filter.address {
        fields.insert("address".into(), json!(address));
    }
    if let Some(keys) = &filter.keys {
        fields.insert("keys".into(), json!(keys));
    }
    fields.insert("chunk_size".into(), json!(filter.chunk_size));
    if let Some(token) = &filter.continuation_token {
        fields.insert("continuation_token".into(), json!(token));
    }
    Ok(json!({ "filter": Value::Object(fields) }))
}

#[async_trait]
impl StarknetRpc for StarknetClient {
    async fn spec_version(&self) -> Result<Value, ClientError> {
        self.request("starknet_specVersion", json!([])).await
    }

    async fn get_block_with_tx_hashes(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        self.block_request("starknet_getBlockWithTxHashes", block_id).await
    }

    async fn get_block_with_txs(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        self.block_request("starknet_getBlockWithTxs", block_id).await
    }

    async fn get_block_with_receipts(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        self.block_request("starknet_getBlockWithReceipts", block_id).await
    }

    async fn get_state_update(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        self.block_request("starknet_getStateUpdate", block_id).await
    }

    async fn get_storage_at(
        &self,
        contract_address: String,
        key: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError> {
        let params = json!({
            "contract_address": contract_address,
            "key": key,
            "block_id": block_id_param(&block_id)?,
        });
        self.request("starknet_getStorageAt", params).await
    }

    async fn get_transaction_status(&self, transaction_hash: String) -> Result<Value, ClientError> {
        self.request(
            "starknet_getTransactionStatus",
            json!({ "transaction_hash": transaction_hash }),
        )
        .await
    }

    async fn get_transaction_by_hash(&self, transaction_hash: String) -> Result<Value, ClientError> {
        self.request(
            "starknet_getTransactionByHash",
            json!({ "transaction_hash": transaction_hash }),
        )
        .await
    }

    async fn get_transaction_by_block_id_and_index(
        &self,
        block_id: CanonicalBlockId,
        index: u64,
    ) -> Result<Value, ClientError> {
        let params = json!({ "block_id": block_id_param(&block_id)?, "index": index });
        self.request("starknet_getTransactionByBlockIdAndIndex", params).await
    }

    async fn get_transaction_receipt(&self, transaction_hash: String) -> Result<Value, ClientError> {
        self.request(
            "starknet_getTransactionReceipt",
            json!({ "transaction_hash": transaction_hash }),
        )
        .await
    }

    async fn get_class(&self, class_hash: String, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        let params = json!({ "block_id": block_id_param(&block_id)?, "class_hash": class_hash });
        self.request("starknet_getClass", params).await
    }

    async fn get_class_hash_at(
        &self,
        contract_address: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError> {
        let params = json!({ "block_id": block_id_param(&block_id)?, "contract_address": contract_address });
        self.request("starknet_getClassHashAt", params).await
    }

    async fn get_class_at(
        &self,
        contract_address: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError> {
        let params = json!({ "block_id": block_id_param(&block_id)?, "contract_address": contract_address });
        self.request("starknet_getClassAt", params).await
    }

    async fn get_block_transaction_count(&self, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        self.block_request("starknet_getBlockTransactionCount", block_id).await
    }

    async fn call_contract(&self, call: FunctionCall, block_id: CanonicalBlockId) -> Result<Value, ClientError> {
        let params = json!({
            "request": {
                "contract_address": call.contract_address,
                "entry_point_selector": resolve_selector(&call.entry_point),
                "calldata": call.calldata,
            },
            "block_id": block_id_param(&block_id)?,
        });
        self.request("starknet_call", params).await
    }

    async fn get_events(&self, filter: EventFilter) -> Result<Value, ClientError> {
        let params = event_filter_param(&filter)?;
        self.request("starknet_getEvents", params).await
    }

    async fn get_nonce_for_address(
        &self,
        contract_address: String,
        block_id: CanonicalBlockId,
    ) -> Result<Value, ClientError> {
        let params = json!({ "block_id": block_id_param(&block_id)?, "contract_address": contract_address });
        self.request("starknet_getNonce", params).await
    }

    async fn get_block_number(&self) -> Result<Value, ClientError> {
        self.request("starknet_blockNumber", json!([])).await
    }

    async fn get_block_latest_accepted(&self) -> Result<Value, ClientError> {
        self.request("starknet_blockHashAndNumber", json!([])).await
    }

    async fn get_chain_id(&self) -> Result<Value, ClientError> {
        self.request("starknet_chainId", json!([])).await
    }

    async fn get_syncing_stats(&self) -> Result<Value, ClientError> {
        self.request("starknet_syncing", json!([])).await
    }
}
