//! # Method Registry
//!
//! Maps each tool name to the Starknet call that serves it. [`dispatch`] is the
//! whole request pipeline: look the name up, validate the arguments, then run
//! the handler. Handler and node failures are returned as-is; turning them
//! into a response envelope is the caller's job.

use serde_json::Value;

use crate::blockchain::{
    block_id::BlockReference,
    client::StarknetRpc,
    models::{EventFilter, FunctionCall},
};
use crate::mcp::{
    error::AdapterError,
    methods::RpcMethod,
    schema::{self, CallArgs, EventsArgs, ValidatedArgs},
};

pub fn lookup(name: &str) -> Option<RpcMethod> {
    RpcMethod::from_name(name)
}

pub async fn dispatch(client: &dyn StarknetRpc, name: &str, raw: &Value) -> Result<Value, AdapterError> {
    // no schema to check against an unknown name
    let method = lookup(name).ok_or_else(|| AdapterError::UnknownMethod(name.to_string()))?;
    let args = schema::validate(method, raw)?;
    invoke(args, client).await
}

/// Runs the handler for already-validated arguments: exactly one node call.
pub async fn invoke(args: ValidatedArgs, client: &dyn StarknetRpc) -> Result<Value, AdapterError> {
    let result = match args {
        ValidatedArgs::SpecVersion => client.spec_version().await,
        ValidatedArgs::BlockWithTxHashes(block) => client.get_block_with_tx_hashes(block.resolve()).await,
        ValidatedArgs::BlockWithTxs(block) => client.get_block_with_txs(block.resolve()).await,
        ValidatedArgs::BlockWithReceipts(block) => client.get_block_with_receipts(block.resolve()).await,
        ValidatedArgs::StateUpdate(block) => client.get_state_update(block.resolve()).await,
        ValidatedArgs::StorageAt(args) => {
            client
                .get_storage_at(args.contract_address, args.key, args.block_id.resolve())
                .await
        }
        ValidatedArgs::TransactionStatus(args) => client.get_transaction_status(args.transaction_hash).await,
        ValidatedArgs::TransactionByHash(args) => client.get_transaction_by_hash(args.transaction_hash).await,
        ValidatedArgs::TransactionByBlockIdAndIndex(args) => {
            client
                .get_transaction_by_block_id_and_index(args.block_id.resolve(), args.index)
                .await
        }
        ValidatedArgs::TransactionReceipt(args) => client.get_transaction_receipt(args.transaction_hash).await,
        ValidatedArgs::Class(args) => client.get_class(args.class_hash, args.block_id.resolve()).await,
        ValidatedArgs::ClassHashAt(args) => {
            client
                .get_class_hash_at(args.contract_address, args.block_id.resolve())
                .await
        }
        ValidatedArgs::ClassAt(args) => {
            client
                .get_class_at(args.contract_address, args.block_id.resolve())
                .await
        }
        ValidatedArgs::BlockTransactionCount(block) => {
            client.get_block_transaction_count(block.resolve()).await
        }
        ValidatedArgs::Call(CallArgs { request, block_id }) => {
            let call = FunctionCall {
                contract_address: request.contract_address,
                entry_point: request.entry_point_selector,
                calldata: request.calldata,
            };
            client.call_contract(call, block_id.resolve()).await
        }
        ValidatedArgs::BlockNumber => client.get_block_number().await,
        ValidatedArgs::BlockHashAndNumber => client.get_block_latest_accepted().await,
        ValidatedArgs::ChainId => client.get_chain_id().await,
        ValidatedArgs::Syncing => client.get_syncing_stats().await,
        ValidatedArgs::Events(EventsArgs { filter }) => {
            let filter = EventFilter {
                from_block: filter.from_block.as_ref().map(BlockReference::resolve),
                to_block: filter.to_block.as_ref().map(BlockReference::resolve),
                address: filter.address,
                keys: filter.keys,
                chunk_size: filter.chunk_size.get(),
                continuation_token: filter.continuation_token,
            };
            client.get_events(filter).await
        }
        ValidatedArgs::Nonce(args) => {
            client
                .get_nonce_for_address(args.contract_address, args.block_id.resolve())
                .await
        }
    };
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{block_id::CanonicalBlockId, models::ClientError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every call as `method(args)` and answers with a fixed reply.
    struct RecordingClient {
        calls: Mutex<Vec<String>>,
        reply: Result<Value, String>,
    }

    impl RecordingClient {
        fn ok(value: Value) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: Ok(value),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: Err(message.to_string()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<Value, ClientError> {
            self.calls.lock().unwrap().push(call);
            self.reply.clone().map_err(|body| ClientError::Http {
                method: "stub".into(),
                status: 502,
                body,
            })
        }
    }

    fn id(block_id: &CanonicalBlockId) -> String {
        serde_json::to_string(block_id).unwrap()
    }

    #[async_trait]
    impl StarknetRpc for RecordingClient {
        async fn spec_version(&self) -> Result<Value, ClientError> {
            self.record("spec_version()".into())
        }
        async fn get_block_with_tx_hashes(&self, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_block_with_tx_hashes({})", id(&b)))
        }
        async fn get_block_with_txs(&self, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_block_with_txs({})", id(&b)))
        }
        async fn get_block_with_receipts(&self, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_block_with_receipts({})", id(&b)))
        }
        async fn get_state_update(&self, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_state_update({})", id(&b)))
        }
        async fn get_storage_at(&self, a: String, k: String, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_storage_at({}, {}, {})", a, k, id(&b)))
        }
        async fn get_transaction_status(&self, h: String) -> Result<Value, ClientError> {
            self.record(format!("get_transaction_status({})", h))
        }
        async fn get_transaction_by_hash(&self, h: String) -> Result<Value, ClientError> {
            self.record(format!("get_transaction_by_hash({})", h))
        }
        async fn get_transaction_by_block_id_and_index(&self, b: CanonicalBlockId, i: u64) -> Result<Value, ClientError> {
            self.record(format!("get_transaction_by_block_id_and_index({}, {})", id(&b), i))
        }
        async fn get_transaction_receipt(&self, h: String) -> Result<Value, ClientError> {
            self.record(format!("get_transaction_receipt({})", h))
        }
        async fn get_class(&self, c: String, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_class({}, {})", c, id(&b)))
        }
        async fn get_class_hash_at(&self, a: String, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_class_hash_at({}, {})", a, id(&b)))
        }
        async fn get_class_at(&self, a: String, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_class_at({}, {})", a, id(&b)))
        }
        async fn get_block_transaction_count(&self, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_block_transaction_count({})", id(&b)))
        }
        async fn call_contract(&self, call: FunctionCall, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!(
                "call_contract({}, {}, [{}], {})",
                call.contract_address,
                call.entry_point,
                call.calldata.join(","),
                id(&b)
            ))
        }
        async fn get_events(&self, f: EventFilter) -> Result<Value, ClientError> {
            self.record(format!(
                "get_events({:?}, {:?}, {:?}, {})",
                f.from_block.as_ref().map(id),
                f.to_block.as_ref().map(id),
                f.address,
                f.chunk_size
            ))
        }
        async fn get_nonce_for_address(&self, a: String, b: CanonicalBlockId) -> Result<Value, ClientError> {
            self.record(format!("get_nonce_for_address({}, {})", a, id(&b)))
        }
        async fn get_block_number(&self) -> Result<Value, ClientError> {
            self.record("get_block_number()".into())
        }
        async fn get_block_latest_accepted(&self) -> Result<Value, ClientError> {
            self.record("get_block_latest_accepted()".into())
        }
        async fn get_chain_id(&self) -> Result<Value, ClientError> {
            self.record("get_chain_id()".into())
        }
        async fn get_syncing_stats(&self) -> Result<Value, ClientError> {
            self.record("get_syncing_stats()".into())
        }
    }

    #[tokio::test]
    async fn test_unknown_method_never_reaches_client() {
        let client = RecordingClient::ok(json!(1));
        let err = dispatch(&client, "starknet_doesNotExist", &json!({"anything": true}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnknownMethod(_)));
        assert!(err.to_string().contains("starknet_doesNotExist"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_client() {
        let client = RecordingClient::ok(json!("0x0"));
        let err = dispatch(
            &client,
            "starknet_getStorageAt",
            &json!({"contract_address": "0x1", "block_id": "latest"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AdapterError::Validation { .. }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_block_number_passes_result_through() {
        let client = RecordingClient::ok(json!(812345));
        let value = dispatch(&client, "starknet_blockNumber", &Value::Null).await.unwrap();
        assert_eq!(value, json!(812345));
        assert_eq!(client.calls(), vec!["get_block_number()"]);
    }

    #[tokio::test]
    async fn test_argument_order_matches_client() {
        let client = RecordingClient::ok(json!(null));
        let block = json!({"block_number": 10});

        dispatch(
            &client,
            "starknet_getStorageAt",
            &json!({"contract_address": "0xa", "key": "0xb", "block_id": block}),
        )
        .await
        .unwrap();
        dispatch(&client, "starknet_getClass", &json!({"block_id": "latest", "class_hash": "0xc"}))
            .await
            .unwrap();
        dispatch(
            &client,
            "starknet_getClassHashAt",
            &json!({"block_id": {"block_hash": "0xd"}, "contract_address": "0xa"}),
        )
        .await
        .unwrap();
        dispatch(
            &client,
            "starknet_getTransactionByBlockIdAndIndex",
            &json!({"block_id": "pending", "index": 4}),
        )
        .await
        .unwrap();
        dispatch(&client, "starknet_getNonce", &json!({"block_id": "latest", "contract_address": "0xa"}))
            .await
            .unwrap();

        assert_eq!(
            client.calls(),
            vec![
                "get_storage_at(0xa, 0xb, 10)",
                "get_class(0xc, \"latest\")",
                "get_class_hash_at(0xa, \"0xd\")",
                "get_transaction_by_block_id_and_index(\"pending\", 4)",
                "get_nonce_for_address(0xa, \"latest\")",
            ]
        );
    }

    #[tokio::test]
    async fn test_block_only_methods_resolve_reference() {
        let client = RecordingClient::ok(json!({}));
        dispatch(&client, "starknet_getBlockWithTxHashes", &json!({"block_hash": "0xabc"}))
            .await
            .unwrap();
        dispatch(&client, "starknet_getBlockTransactionCount", &json!({"block_id": {"block_number": 3}}))
            .await
            .unwrap();
        assert_eq!(
            client.calls(),
            vec!["get_block_with_tx_hashes(\"0xabc\")", "get_block_transaction_count(3)"]
        );
    }

    #[tokio::test]
    async fn test_call_reshapes_request() {
        let client = RecordingClient::ok(json!(["0x0"]));
        dispatch(
            &client,
            "starknet_call",
            &json!({
                "request": {"contract_address": "0xa", "entry_point_selector": "balanceOf", "calldata": ["0x1", "0x2"]},
                "block_id": "latest"
            }),
        )
        .await
        .unwrap();
        assert_eq!(client.calls(), vec!["call_contract(0xa, balanceOf, [0x1,0x2], \"latest\")"]);
    }

    #[tokio::test]
    async fn test_events_resolve_filter_bounds() {
        let client = RecordingClient::ok(json!({"events": []}));
        dispatch(
            &client,
            "starknet_getEvents",
            &json!({"filter": {"from_block": {"block_number": 1}, "to_block": "latest", "chunk_size": 50}}),
        )
        .await
        .unwrap();
        assert_eq!(
            client.calls(),
            vec!["get_events(Some(\"1\"), Some(\"\\\"latest\\\"\"), None, 50)"]
        );
    }

    #[tokio::test]
    async fn test_absent_arguments_fail_before_client() {
        let client = RecordingClient::ok(json!(null));
        for method in RpcMethod::ALL {
            match method {
                RpcMethod::SpecVersion
                | RpcMethod::BlockNumber
                | RpcMethod::BlockHashAndNumber
                | RpcMethod::ChainId
                | RpcMethod::Syncing => continue,
                _ => {}
            }
            let err = dispatch(&client, method.name(), &Value::Null).await.unwrap_err();
            assert!(matches!(err, AdapterError::Validation { .. }), "{}: {}", method, err);
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_is_propagated() {
        let client = RecordingClient::failing("connection reset by peer");
        let cases = [
            ("starknet_chainId", json!({})),
            ("starknet_getBlockWithTxs", json!({"block_number": 9})),
            ("starknet_getClassAt", json!({"block_id": "latest", "contract_address": "0xa"})),
            (
                "starknet_call",
                json!({
                    "request": {"contract_address": "0xa", "entry_point_selector": "0x2"},
                    "block_id": {"block_hash": "0xb"}
                }),
            ),
            ("starknet_getEvents", json!({"filter": {"chunk_size": 10}})),
        ];

        for (name, args) in &cases {
            let err = dispatch(&client, name, args).await.unwrap_err();
            assert!(matches!(err, AdapterError::Remote(_)), "{}: {}", name, err);
            assert!(err.to_string().contains("connection reset by peer"), "{}: {}", name, err);
        }
        assert_eq!(
            client.calls(),
            vec![
                "get_chain_id()",
                "get_block_with_txs(9)",
                "get_class_at(0xa, \"latest\")",
                "call_contract(0xa, 0x2, [], \"0xb\")",
                "get_events(None, None, None, 10)",
            ]
        );
    }
}
