//! Block identifier resolution.
//!
//! Callers name a block in one of three shapes: a tag string (`"latest"`,
//! `"pending"`, or a passthrough identifier), a record carrying `block_hash`,
//! or a record carrying `block_number`. Resolution reduces any of them to the
//! single value the remote client accepts. It never touches the network.

use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Block tags accepted by the Starknet v0.7 JSON-RPC API.
pub const BLOCK_TAGS: [&str; 2] = ["latest", "pending"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid block identifier")]
pub struct InvalidBlockId;

/// A caller-supplied block reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReference {
    /// Plain string: a block tag or an identifier passed through untouched.
    Tag(String),
    Hash(String),
    Number(u64),
}

/// The resolved form handed to the remote client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CanonicalBlockId {
    Id(String),
    Number(u64),
}

impl BlockReference {
    pub fn resolve(&self) -> CanonicalBlockId {
        match self {
            BlockReference::Tag(id) | BlockReference::Hash(id) => CanonicalBlockId::Id(id.clone()),
            BlockReference::Number(number) => CanonicalBlockId::Number(*number),
        }
    }
}

impl TryFrom<&Value> for BlockReference {
    type Error = InvalidBlockId;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(id) => Ok(BlockReference::Tag(id.clone())),
            Value::Object(fields) => {
                // block_hash wins when both fields are present
                if let Some(hash) = fields.get("block_hash") {
                    return hash
                        .as_str()
                        .map(|h| BlockReference::Hash(h.to_string()))
                        .ok_or(InvalidBlockId);
                }
                if let Some(number) = fields.get("block_number") {
                    return number.as_u64().map(BlockReference::Number).ok_or(InvalidBlockId);
                }
                Err(InvalidBlockId)
            }
            _ => Err(InvalidBlockId),
        }
    }
}

// Serializes back into the shape it was read from.
impl Serialize for BlockReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockReference::Tag(tag) => serializer.serialize_str(tag),
            BlockReference::Hash(hash) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("block_hash", hash)?;
                map.end()
            }
            BlockReference::Number(number) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("block_number", number)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for BlockReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        BlockReference::try_from(&value).map_err(serde::de::Error::custom)
    }
}

/// Resolves an untyped block reference into its canonical id.
pub fn resolve_block_id(reference: &Value) -> Result<CanonicalBlockId, InvalidBlockId> {
    BlockReference::try_from(reference).map(|r| r.resolve())
}
