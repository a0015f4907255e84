//! Stdio wire protocol — JSON-RPC style, MCP-compatible framing
//!
//! Client → Server (one JSON object per line on stdin):
//!   { "jsonrpc": "2.0", "id": 1, "method": "tools/call",
//!     "params": { "name": "generate_code", "arguments": { ... } } }
//!
//! Server → Client (one JSON object per line on stdout):
//!   { "jsonrpc": "2.0", "id": 1, "result": { ... } }
//!   { "jsonrpc": "2.0", "id": 1, "error": { "code": -32601, "message": "..." } }
//!
//! Ids are echoed verbatim (clients send numbers or strings). Everything
//! except protocol frames stays off stdout — logs go to rotating files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const PARSE_ERROR: i32 = -32700;

/// RPC request from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// RPC response to the client.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// Error payload carried in an RPC response. `data` holds the structured
/// failure detail (kind, attempts, correlation id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    /// Successful response with a result value.
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response.
    pub fn err(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self::err_with_data(id, code, message, None)
    }

    pub fn err_with_data(
        id: Value,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    /// Shorthand for a method-not-found error.
    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::err(id, METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Shorthand for an internal error.
    pub fn internal_error(id: Value, message: impl Into<String>) -> Self {
        Self::err(id, INTERNAL_ERROR, message)
    }
}
