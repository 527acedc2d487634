//! # MCP Handler Module
//!
//! This module implements the Model Context Protocol (MCP) for the Starknet server.
//! It handles incoming MCP requests and dispatches tool calls to the method registry.
//!
//! ## Protocol Methods
//! - `initialize` - Server info, capabilities and protocol version negotiation
//! - `ping` - Liveness check
//! - `tools/list` - The static tool catalog
//! - `tools/call` - Invoke one Starknet read operation
//!
//! Any tool name (e.g. `starknet_blockNumber`) may also be sent directly as the
//! JSON-RPC method; it is rewritten into `tools/call`.

use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::{
    mcp::{
        envelope::ToolResponse,
        protocol::{error_codes, Request, Response},
        registry,
        tools::tool_catalog,
    },
    AppState,
};

/// Protocol revisions this server speaks, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        debug!("Notification {} acknowledged without response", req.method);
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.reply_id(), json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        // Direct tool invocations are rewritten into tools/call to reuse the same logic
        name if registry::lookup(name).is_some() => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": name,
                    "arguments": req.params.clone().unwrap_or(Value::Null)
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.reply_id(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request. Tool failures come back as an error envelope,
/// never as a JSON-RPC error.
async fn handle_tool_call(req: Request, state: AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.reply_id(),
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name = match params.get("name").and_then(|n| n.as_str()) {
        Some(name) => name,
        None => {
            return Response::error(
                req.reply_id(),
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params".into(),
            )
        }
    };

    let no_args = Value::Null;
    let args = params.get("arguments").unwrap_or(&no_args);
    debug!("Request {} {}", tool_name, args);

    let outcome = registry::dispatch(state.starknet.as_ref(), tool_name, args).await;
    match &outcome {
        Ok(result) => debug!("Response {}", result),
        Err(e) => error!("Error handling {} request: {}", tool_name, e),
    }

    let envelope = ToolResponse::from_outcome(outcome);
    match serde_json::to_value(&envelope) {
        Ok(result) => Response::success(req.reply_id(), result),
        Err(e) => Response::error(
            req.reply_id(),
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize tool response: {}", e),
        ),
    }
}

fn handle_initialize(req: &Request) -> Response {
    let requested = req
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str());
    let protocol_version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

    let server_info = json!({
        "name": "starknet-mcp",
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions =
        "Starknet MCP server exposing read-only JSON-RPC queries for blocks, transactions, contract state and events.";

    Response::success(
        req.reply_id(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": protocol_version,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request by returning the tool catalog.
fn handle_tools_list(req: &Request) -> Response {
    Response::success(req.reply_id(), json!({ "tools": tool_catalog() }))
}
