//! Codex CLI transport — one subprocess per call
//!
//! The CLI is invoked in quiet JSON mode; it emits a stream of JSON lines
//! on stdout and the completion rides in the last one. A non-zero exit,
//! empty output, or unparseable JSON is an `InvalidResponse` — the CLI
//! either works or it doesn't, there is nothing transient about a
//! malformed reply.

use crate::backend::CompletionBackend;
use codexbridge_core::{BackendOptions, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

// Strip ANSI escape sequences from CLI stderr before logging.
static ANSI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[mK]").unwrap());

pub struct CodexCli {
    binary: PathBuf,
}

impl CodexCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionBackend for CodexCli {
    fn name(&self) -> &'static str {
        "codex-cli"
    }

    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        _options: &BackendOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<String> {
        debug!("spawning codex: model={}", model);

        let child = Command::new(&self.binary)
            .arg("--json")
            .arg("--model")
            .arg(model)
            .arg("-q")
            .arg(prompt)
            .arg("--approval-mode=full-auto")
            .arg("--disable-shell")
            .env("CI", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::BackendUnavailable(format!(
                    "codex binary not found at {}",
                    self.binary.display()
                )),
                _ => Error::Transport(format!("failed to spawn codex: {}", e)),
            })?;

        // wait_with_output owns the child; dropping the future on the
        // cancel branch kills the process via kill_on_drop.
        let output = match cancel {
            Some(token) => tokio::select! {
                out = child.wait_with_output() => out,
                _ = token.cancelled() => {
                    return Err(Error::Transport("request cancelled".to_string()));
                }
            },
            None => child.wait_with_output().await,
        }
        .map_err(|e| Error::Transport(format!("failed to read codex output: {}", e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            let line = ANSI_RE.replace_all(line, "");
            if !line.trim().is_empty() {
                debug!("codex stderr: {}", line);
            }
        }

        if !output.status.success() {
            let detail = stderr.trim();
            return Err(Error::InvalidResponse(if detail.is_empty() {
                format!(
                    "codex exited with status {}",
                    output.status.code().unwrap_or(-1)
                )
            } else {
                format!(
                    "codex exited with status {}: {}",
                    output.status.code().unwrap_or(-1),
                    ANSI_RE.replace_all(detail, "")
                )
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_cli_output(&stdout)
    }
}

/// Extract the completion from the CLI's stdout: take the last non-empty
/// JSON line and pull the first populated completion field out of it.
pub fn parse_cli_output(stdout: &str) -> Result<String> {
    let last_line = stdout
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| Error::InvalidResponse("codex produced no output".to_string()))?;

    let payload: Value = serde_json::from_str(last_line)
        .map_err(|e| Error::InvalidResponse(format!("invalid JSON from codex: {}", e)))?;

    extract_completion(&payload).ok_or_else(|| {
        Error::InvalidResponse("codex JSON did not contain a completion field".to_string())
    })
}

/// Several field names have been observed across CLI releases
/// (completion, text, response, content); `content` may be a block list.
pub fn extract_completion(payload: &Value) -> Option<String> {
    for key in ["completion", "text", "response", "content"] {
        match payload.get(key) {
            Some(Value::String(s)) if !s.is_empty() => {
                return Some(s.trim_start_matches('\n').to_string());
            }
            Some(Value::Array(blocks)) if key == "content" => {
                let first = blocks.first()?;
                let text = match first {
                    Value::String(s) => s.as_str(),
                    other => other.get("text").and_then(Value::as_str).unwrap_or(""),
                };
                return Some(text.trim_start_matches('\n').to_string());
            }
            _ => {}
        }
    }
    None
}
