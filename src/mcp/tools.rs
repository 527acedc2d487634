// src/mcp/tools.rs

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::mcp::methods::RpcMethod;

const FELT_PATTERN: &str = "^0x[a-fA-F0-9]{1,64}$";

lazy_static! {
    static ref TOOL_CATALOG: Value = build_catalog();
}

/// The `tools/list` payload. Built once per process and never mutated.
pub fn tool_catalog() -> &'static Value {
    &TOOL_CATALOG
}

fn build_catalog() -> Value {
    let tools: Vec<Value> = RpcMethod::ALL
        .iter()
        .map(|method| {
            json!({
                "name": method.name(),
                "description": method.description(),
                "inputSchema": input_schema(*method),
            })
        })
        .collect();
    Value::Array(tools)
}

fn felt(description: &str) -> Value {
    json!({ "type": "string", "pattern": FELT_PATTERN, "description": description })
}

fn block_id() -> Value {
    json!({
        "description": "Block tag ('latest' or 'pending'), block hash, or {block_hash} / {block_number}",
        "oneOf": [
            { "type": "string", "enum": ["latest", "pending"] },
            { "type": "string", "pattern": FELT_PATTERN },
            {
                "type": "object",
                "properties": { "block_hash": felt("The block hash") },
                "required": ["block_hash"]
            },
            {
                "type": "object",
                "properties": { "block_number": { "type": "integer", "minimum": 0 } },
                "required": ["block_number"]
            }
        ]
    })
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn block_only() -> Value {
    json!({
        "type": "object",
        "description": "Pass block_id, or block_hash / block_number directly",
        "properties": {
            "block_id": block_id(),
            "block_hash": felt("The block hash"),
            "block_number": { "type": "integer", "minimum": 0 }
        }
    })
}

fn contract_at_block() -> Value {
    json!({
        "type": "object",
        "properties": {
            "block_id": block_id(),
            "contract_address": felt("The address of the contract")
        },
        "required": ["block_id", "contract_address"]
    })
}

fn transaction_hash() -> Value {
    json!({
        "type": "object",
        "properties": { "transaction_hash": felt("The hash of the transaction") },
        "required": ["transaction_hash"]
    })
}

/// JSON schema advertised for each tool's arguments.
pub fn input_schema(method: RpcMethod) -> Value {
    match method {
        RpcMethod::SpecVersion
        | RpcMethod::BlockNumber
        | RpcMethod::BlockHashAndNumber
        | RpcMethod::ChainId
        | RpcMethod::Syncing => no_arguments(),
        RpcMethod::GetBlockWithTxHashes
        | RpcMethod::GetBlockWithTxs
        | RpcMethod::GetBlockWithReceipts
        | RpcMethod::GetStateUpdate
        | RpcMethod::GetBlockTransactionCount => block_only(),
        RpcMethod::GetTransactionStatus
        | RpcMethod::GetTransactionByHash
        | RpcMethod::GetTransactionReceipt => transaction_hash(),
        RpcMethod::GetClassHashAt | RpcMethod::GetClassAt | RpcMethod::GetNonce => contract_at_block(),
        RpcMethod::GetStorageAt => json!({
            "type": "object",
            "properties": {
                "contract_address": felt("The address of the contract to read from"),
                "key": felt("The key to the storage value for the given contract"),
                "block_id": block_id()
            },
            "required": ["contract_address", "key", "block_id"]
        }),
        RpcMethod::GetTransactionByBlockIdAndIndex => json!({
            "type": "object",
            "properties": {
                "block_id": block_id(),
                "index": { "type": "integer", "minimum": 0, "description": "The index in the block to search for the transaction" }
            },
            "required": ["block_id", "index"]
        }),
        RpcMethod::GetClass => json!({
            "type": "object",
            "properties": {
                "block_id": block_id(),
                "class_hash": felt("The hash of the requested contract class")
            },
            "required": ["block_id", "class_hash"]
        }),
        RpcMethod::Call => json!({
            "type": "object",
            "properties": {
                "request": {
                    "type": "object",
                    "properties": {
                        "contract_address": felt("The address of the contract to call"),
                        "entry_point_selector": {
                            "type": "string",
                            "description": "Selector felt, or the function name to derive it from"
                        },
                        "calldata": {
                            "type": "array",
                            "items": felt("Calldata felt"),
                            "description": "The parameters passed to the function"
                        }
                    },
                    "required": ["contract_address", "entry_point_selector"]
                },
                "block_id": block_id()
            },
            "required": ["request", "block_id"]
        }),
        RpcMethod::GetEvents => json!({
            "type": "object",
            "properties": {
                "filter": {
                    "type": "object",
                    "properties": {
                        "from_block": block_id(),
                        "to_block": block_id(),
                        "address": felt("Emitting contract address"),
                        "keys": {
                            "type": "array",
                            "items": { "type": "array", "items": felt("Event key") },
                            "description": "Per key position, the accepted values"
                        },
                        "chunk_size": { "type": "integer", "minimum": 1 },
                        "continuation_token": { "type": "string" }
                    },
                    "required": ["chunk_size"]
                }
            },
            "required": ["filter"]
        }),
    }
}
