//! RPC router — dispatches JSON-RPC method calls to handlers
//!
//! Methods follow the MCP shape: initialize, tools/list, tools/call,
//! ping. Tool failures come back as JSON-RPC errors whose `data` carries
//! the structured detail (kind, attempts, correlation id) so callers can
//! find the logged backend exchange.

use codexbridge_core::protocol::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use codexbridge_core::RpcError;
use codexbridge_llm::Dispatcher;
use codexbridge_tools::{ToolCallError, ToolRegistry};
use serde_json::{json, Value};
use tracing::info;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct ServerState {
    pub registry: ToolRegistry,
    pub dispatcher: Dispatcher,
}

pub type RpcResult = Result<Value, RpcError>;

/// Route an RPC method call to the appropriate handler.
pub async fn route_rpc(method: &str, params: Value, state: &ServerState) -> RpcResult {
    match method {
        "initialize" => Ok(handle_initialize()),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(handle_tools_list(state)),
        "tools/call" => handle_tools_call(params, state).await,
        _ => Err(RpcError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", method),
            data: None,
        }),
    }
}

fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": "codexbridge",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": {}
        }
    })
}

fn handle_tools_list(state: &ServerState) -> Value {
    json!({ "tools": state.registry.definitions() })
}

// ---------------------------------------------------------------------------
// tools/call — run one operation
// ---------------------------------------------------------------------------

async fn handle_tools_call(params: Value, state: &ServerState) -> RpcResult {
    let name = params["name"].as_str().ok_or_else(|| RpcError {
        code: INVALID_PARAMS,
        message: "Missing required param: name".to_string(),
        data: None,
    })?;
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    info!("tools/call: {}", name);

    match state
        .registry
        .call(name, &arguments, &state.dispatcher, None)
        .await
    {
        Ok(completion) => Ok(json!({
            "content": [{ "type": "text", "text": completion.text }],
            "isError": false,
        })),
        Err(err) => Err(tool_error_to_rpc(err)),
    }
}

fn tool_error_to_rpc(err: ToolCallError) -> RpcError {
    let code = match &err {
        ToolCallError::UnknownTool(_) | ToolCallError::Rejected { .. } => INVALID_PARAMS,
        ToolCallError::Failed { .. } => INTERNAL_ERROR,
    };
    let mut data = json!({ "kind": err.kind() });
    if let ToolCallError::Failed { .. } = &err {
        data["attempts"] = json!(err.attempts());
        if let Some(correlation) = err.correlation() {
            data["correlation"] = json!(correlation.to_string());
        }
    }
    RpcError {
        code,
        message: err.to_string(),
        data: Some(data),
    }
}
