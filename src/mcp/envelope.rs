// src/mcp/envelope.rs

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// The `tools/call` result: one text segment plus the error flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Wraps a node result as compact JSON text.
    pub fn success(result: &Value) -> Self {
        match serde_json::to_string(result) {
            Ok(text) => Self {
                content: vec![ContentItem::text(text)],
                is_error: false,
            },
            Err(e) => Self::failure(e),
        }
    }

    pub fn failure(error: impl Display) -> Self {
        Self {
            content: vec![ContentItem::text(error.to_string())],
            is_error: true,
        }
    }

    pub fn from_outcome<E: Display>(outcome: Result<Value, E>) -> Self {
        match outcome {
            Ok(result) => Self::success(&result),
            Err(error) => Self::failure(error),
        }
    }
}
