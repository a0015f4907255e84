//! Stdio server loop
//!
//! One JSON object per line in each direction. Every request runs on its
//! own task, so slow backend calls never block the read loop and
//! responses may complete out of submission order. A single writer task
//! owns stdout — that is what keeps response framing intact under
//! concurrency.

use crate::router::{route_rpc, ServerState};
use codexbridge_core::protocol::{RpcRequest, RpcResponse, JSONRPC_VERSION, PARSE_ERROR};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub async fn serve_stdio(state: Arc<ServerState>) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            if stdout.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if stdout.write_all(b"\n").await.is_err() {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    info!("serving on stdio");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let state = state.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = process_line(&state, &line).await {
                let _ = tx.send(response).await;
            }
        });
    }

    // stdin closed: let in-flight responses drain, then stop the writer.
    drop(tx);
    let _ = writer.await;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Handle one inbound line. Returns the serialized response, or None for
/// notifications (requests without an id).
pub async fn process_line(state: &ServerState, line: &str) -> Option<String> {
    let request: RpcRequest = match serde_json::from_str(line) {
        Ok(req) => req,
        Err(e) => {
            let resp =
                RpcResponse::err(Value::Null, PARSE_ERROR, format!("invalid request: {}", e));
            return serde_json::to_string(&resp).ok();
        }
    };

    if request.id.is_null() {
        debug!("notification: {}", request.method);
        return None;
    }

    let response = match route_rpc(&request.method, request.params, state).await {
        Ok(result) => RpcResponse::ok(request.id, result),
        Err(error) => RpcResponse {
            jsonrpc: JSONRPC_VERSION,
            id: request.id,
            result: None,
            error: Some(error),
        },
    };
    serde_json::to_string(&response).ok()
}
