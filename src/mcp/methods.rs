// src/mcp/methods.rs

use std::fmt;

/// The closed set of Starknet read operations exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    SpecVersion,
    GetBlockWithTxHashes,
    GetBlockWithTxs,
    GetBlockWithReceipts,
    GetStateUpdate,
    GetStorageAt,
    GetTransactionStatus,
    GetTransactionByHash,
    GetTransactionByBlockIdAndIndex,
    GetTransactionReceipt,
    GetClass,
    GetClassHashAt,
    GetClassAt,
    GetBlockTransactionCount,
    Call,
    BlockNumber,
    BlockHashAndNumber,
    ChainId,
    Syncing,
    GetEvents,
    GetNonce,
}

impl RpcMethod {
    /// Every operation, in catalog order.
    pub const ALL: [RpcMethod; 21] = [
        RpcMethod::SpecVersion,
        RpcMethod::GetBlockWithTxHashes,
        RpcMethod::GetBlockWithTxs,
        RpcMethod::GetBlockWithReceipts,
        RpcMethod::GetStateUpdate,
        RpcMethod::GetStorageAt,
        RpcMethod::GetTransactionStatus,
        RpcMethod::GetTransactionByHash,
        RpcMethod::GetTransactionByBlockIdAndIndex,
        RpcMethod::GetTransactionReceipt,
        RpcMethod::GetClass,
        RpcMethod::GetClassHashAt,
        RpcMethod::GetClassAt,
        RpcMethod::GetBlockTransactionCount,
        RpcMethod::Call,
        RpcMethod::BlockNumber,
        RpcMethod::BlockHashAndNumber,
        RpcMethod::ChainId,
        RpcMethod::Syncing,
        RpcMethod::GetEvents,
        RpcMethod::GetNonce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RpcMethod::SpecVersion => "starknet_specVersion",
            RpcMethod::GetBlockWithTxHashes => "starknet_getBlockWithTxHashes",
            RpcMethod::GetBlockWithTxs => "starknet_getBlockWithTxs",
            RpcMethod::GetBlockWithReceipts => "starknet_getBlockWithReceipts",
            RpcMethod::GetStateUpdate => "starknet_getStateUpdate",
            RpcMethod::GetStorageAt => "starknet_getStorageAt",
            RpcMethod::GetTransactionStatus => "starknet_getTransactionStatus",
            RpcMethod::GetTransactionByHash => "starknet_getTransactionByHash",
            RpcMethod::GetTransactionByBlockIdAndIndex => "starknet_getTransactionByBlockIdAndIndex",
            RpcMethod::GetTransactionReceipt => "starknet_getTransactionReceipt",
            RpcMethod::GetClass => "starknet_getClass",
            RpcMethod::GetClassHashAt => "starknet_getClassHashAt",
            RpcMethod::GetClassAt => "starknet_getClassAt",
            RpcMethod::GetBlockTransactionCount => "starknet_getBlockTransactionCount",
            RpcMethod::Call => "starknet_call",
            RpcMethod::BlockNumber => "starknet_blockNumber",
            RpcMethod::BlockHashAndNumber => "starknet_blockHashAndNumber",
            RpcMethod::ChainId => "starknet_chainId",
            RpcMethod::Syncing => "starknet_syncing",
            RpcMethod::GetEvents => "starknet_getEvents",
            RpcMethod::GetNonce => "starknet_getNonce",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|method| method.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            RpcMethod::SpecVersion => {
                "Returns the version of the Starknet JSON-RPC specification being used"
            }
            RpcMethod::GetBlockWithTxHashes => {
                "Get block information with transaction hashes given the block id"
            }
            RpcMethod::GetBlockWithTxs => "Get block information with full transactions given the block id",
            RpcMethod::GetBlockWithReceipts => {
                "Get block information with full transactions and receipts given the block id"
            }
            RpcMethod::GetStateUpdate => {
                "Get the information about the result of executing the requested block"
            }
            RpcMethod::GetStorageAt => "Get the value of the storage at the given address and key",
            RpcMethod::GetTransactionStatus => {
                "Gets the transaction status (possibly reflecting that the tx is still in the mempool, or dropped from it)"
            }
            RpcMethod::GetTransactionByHash => "Get the details and status of a submitted transaction",
            RpcMethod::GetTransactionByBlockIdAndIndex => {
                "Get the details of a transaction by a given block id and index"
            }
            RpcMethod::GetTransactionReceipt => "Get the transaction receipt by the transaction hash",
            RpcMethod::GetClass => {
                "Get the contract class definition in the given block associated with the given hash"
            }
            RpcMethod::GetClassHashAt => {
                "Get the contract class hash in the given block for the contract deployed at the given address"
            }
            RpcMethod::GetClassAt => {
                "Get the contract class definition in the given block at the given address"
            }
            RpcMethod::GetBlockTransactionCount => {
                "Get the number of transactions in a block given a block id"
            }
            RpcMethod::Call => "call a starknet function without creating a StarkNet transaction",
            RpcMethod::BlockNumber => "Get the most recent accepted block number",
            RpcMethod::BlockHashAndNumber => "Get the most recent accepted block hash and number",
            RpcMethod::ChainId => "Return the currently configured StarkNet chain id",
            RpcMethod::Syncing => {
                "Returns an object about the sync status, or false if the node is not synching"
            }
            RpcMethod::GetEvents => "Returns all events matching the given filter",
            RpcMethod::GetNonce => "Get the nonce associated with the given address in the given block",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
