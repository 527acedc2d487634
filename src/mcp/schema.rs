//! # Argument Schemas
//!
//! One validation rule per tool. Raw MCP `arguments` come in untyped; a
//! successful [`validate`] returns a [`ValidatedArgs`] variant whose fields are
//! guaranteed present, of the right primitive type, and well formed (felts are
//! `0x` hex, block tags are known, counts are in range). Nothing is guessed:
//! a value that does not fit the schema is rejected.

use std::borrow::Cow;
use std::num::NonZeroU64;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::blockchain::{
    block_id::{BlockReference, BLOCK_TAGS},
    models::is_felt,
};
use crate::mcp::{error::AdapterError, methods::RpcMethod};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct StorageAtArgs {
    #[validate(custom = "validate_felt")]
    pub contract_address: String,
    #[validate(custom = "validate_felt")]
    pub key: String,
    #[validate(custom = "validate_block_reference")]
    pub block_id: BlockReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct TransactionHashArgs {
    #[validate(custom = "validate_felt")]
    pub transaction_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct BlockIdAndIndexArgs {
    #[validate(custom = "validate_block_reference")]
    pub block_id: BlockReference,
    pub index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ClassArgs {
    #[validate(custom = "validate_block_reference")]
    pub block_id: BlockReference,
    #[validate(custom = "validate_felt")]
    pub class_hash: String,
}

/// Shared by `getClassHashAt`, `getClassAt` and `getNonce`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ContractAtBlockArgs {
    #[validate(custom = "validate_block_reference")]
    pub block_id: BlockReference,
    #[validate(custom = "validate_felt")]
    pub contract_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct FunctionCallArgs {
    #[validate(custom = "validate_felt")]
    pub contract_address: String,
    #[validate(length(min = 1))]
    pub entry_point_selector: String,
    #[serde(default)]
    #[validate(custom = "validate_felt_list")]
    pub calldata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CallArgs {
    #[validate]
    pub request: FunctionCallArgs,
    #[validate(custom = "validate_block_reference")]
    pub block_id: BlockReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct EventFilterArgs {
    #[serde(default)]
    #[validate(custom = "validate_block_reference")]
    pub from_block: Option<BlockReference>,
    #[serde(default)]
    #[validate(custom = "validate_block_reference")]
    pub to_block: Option<BlockReference>,
    #[serde(default)]
    #[validate(custom = "validate_felt")]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_event_keys")]
    pub keys: Option<Vec<Vec<String>>>,
    pub chunk_size: NonZeroU64,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct EventsArgs {
    #[validate]
    pub filter: EventFilterArgs,
}

/// Validated arguments, one variant per tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedArgs {
    SpecVersion,
    BlockWithTxHashes(BlockReference),
    BlockWithTxs(BlockReference),
    BlockWithReceipts(BlockReference),
    StateUpdate(BlockReference),
    StorageAt(StorageAtArgs),
    TransactionStatus(TransactionHashArgs),
    TransactionByHash(TransactionHashArgs),
    TransactionByBlockIdAndIndex(BlockIdAndIndexArgs),
    TransactionReceipt(TransactionHashArgs),
    Class(ClassArgs),
    ClassHashAt(ContractAtBlockArgs),
    ClassAt(ContractAtBlockArgs),
    BlockTransactionCount(BlockReference),
    Call(CallArgs),
    BlockNumber,
    BlockHashAndNumber,
    ChainId,
    Syncing,
    Events(EventsArgs),
    Nonce(ContractAtBlockArgs),
}

/// Validates raw arguments against the schema bound to `method`.
pub fn validate(method: RpcMethod, raw: &Value) -> Result<ValidatedArgs, AdapterError> {
    let args = match method {
        RpcMethod::SpecVersion => {
            no_arguments(method, raw)?;
            ValidatedArgs::SpecVersion
        }
        RpcMethod::GetBlockWithTxHashes => ValidatedArgs::BlockWithTxHashes(block_argument(method, raw)?),
        RpcMethod::GetBlockWithTxs => ValidatedArgs::BlockWithTxs(block_argument(method, raw)?),
        RpcMethod::GetBlockWithReceipts => ValidatedArgs::BlockWithReceipts(block_argument(method, raw)?),
        RpcMethod::GetStateUpdate => ValidatedArgs::StateUpdate(block_argument(method, raw)?),
        RpcMethod::GetStorageAt => ValidatedArgs::StorageAt(parse(method, raw)?),
        RpcMethod::GetTransactionStatus => ValidatedArgs::TransactionStatus(parse(method, raw)?),
        RpcMethod::GetTransactionByHash => ValidatedArgs::TransactionByHash(parse(method, raw)?),
        RpcMethod::GetTransactionByBlockIdAndIndex => {
            ValidatedArgs::TransactionByBlockIdAndIndex(parse(method, raw)?)
        }
        RpcMethod::GetTransactionReceipt => ValidatedArgs::TransactionReceipt(parse(method, raw)?),
        RpcMethod::GetClass => ValidatedArgs::Class(parse(method, raw)?),
        RpcMethod::GetClassHashAt => ValidatedArgs::ClassHashAt(parse(method, raw)?),
        RpcMethod::GetClassAt => ValidatedArgs::ClassAt(parse(method, raw)?),
        RpcMethod::GetBlockTransactionCount => {
            ValidatedArgs::BlockTransactionCount(block_argument(method, raw)?)
        }
        RpcMethod::Call => ValidatedArgs::Call(parse(method, raw)?),
        RpcMethod::BlockNumber => {
            no_arguments(method, raw)?;
            ValidatedArgs::BlockNumber
        }
        RpcMethod::BlockHashAndNumber => {
            no_arguments(method, raw)?;
            ValidatedArgs::BlockHashAndNumber
        }
        RpcMethod::ChainId => {
            no_arguments(method, raw)?;
            ValidatedArgs::ChainId
        }
        RpcMethod::Syncing => {
            no_arguments(method, raw)?;
            ValidatedArgs::Syncing
        }
        RpcMethod::GetEvents => ValidatedArgs::Events(parse(method, raw)?),
        RpcMethod::GetNonce => ValidatedArgs::Nonce(parse(method, raw)?),
    };
    Ok(args)
}

/// Same as [`validate`], looking the tool up by name first.
pub fn validate_by_name(name: &str, raw: &Value) -> Result<ValidatedArgs, AdapterError> {
    let method = RpcMethod::from_name(name).ok_or_else(|| AdapterError::UnknownMethod(name.to_string()))?;
    validate(method, raw)
}

fn parse<T: DeserializeOwned + Validate>(method: RpcMethod, raw: &Value) -> Result<T, AdapterError> {
    if raw.is_null() {
        return Err(AdapterError::validation(method, "arguments are required"));
    }
    let args = T::deserialize(raw).map_err(|e| AdapterError::validation(method, e.to_string()))?;
    args.validate()
        .map_err(|errors| AdapterError::validation(method, describe(&errors)))?;
    Ok(args)
}

fn no_arguments(method: RpcMethod, raw: &Value) -> Result<(), AdapterError> {
    match raw {
        Value::Null | Value::Object(_) => Ok(()),
        other => Err(AdapterError::validation(
            method,
            format!("takes no arguments, got {}", other),
        )),
    }
}

// Block-only tools take the reference as the whole payload or under `block_id`.
fn block_argument(method: RpcMethod, raw: &Value) -> Result<BlockReference, AdapterError> {
    let reference = match raw {
        Value::Null => return Err(AdapterError::validation(method, "block_id is required")),
        Value::Object(fields) => fields.get("block_id").unwrap_or(raw),
        other => other,
    };
    let reference = BlockReference::try_from(reference)?;
    validate_block_reference(&reference).map_err(|e| {
        AdapterError::validation(method, format!("block_id: {}", error_message(&e)))
    })?;
    Ok(reference)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_felt(value: &str) -> Result<(), ValidationError> {
    if is_felt(value) {
        Ok(())
    } else {
        Err(invalid("felt", "must be a 0x-prefixed hex string of 1 to 64 digits"))
    }
}

#[allow(clippy::ptr_arg)]
fn validate_felt_list(values: &Vec<String>) -> Result<(), ValidationError> {
    if values.iter().all(|v| is_felt(v)) {
        Ok(())
    } else {
        Err(invalid("felt", "every item must be a 0x-prefixed hex felt"))
    }
}

#[allow(clippy::ptr_arg)]
fn validate_event_keys(keys: &Vec<Vec<String>>) -> Result<(), ValidationError> {
    if keys.iter().flatten().all(|k| is_felt(k)) {
        Ok(())
    } else {
        Err(invalid("felt", "every key must be a 0x-prefixed hex felt"))
    }
}

fn validate_block_reference(reference: &BlockReference) -> Result<(), ValidationError> {
    match reference {
        BlockReference::Tag(tag) if BLOCK_TAGS.contains(&tag.as_str()) || is_felt(tag) => Ok(()),
        BlockReference::Tag(_) => Err(invalid(
            "block_tag",
            "must be \"latest\", \"pending\", a block hash, or {block_hash} / {block_number}",
        )),
        BlockReference::Hash(hash) if is_felt(hash) => Ok(()),
        BlockReference::Hash(_) => Err(invalid("felt", "block_hash must be a 0x-prefixed hex felt")),
        BlockReference::Number(_) => Ok(()),
    }
}

fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_deref()
        .unwrap_or(&*error.code)
        .to_string()
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.join("; ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(name, _)| **name);
    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(format!("{}: {}", path, error_message(error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}
