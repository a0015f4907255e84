//! Tool trait and registry
//!
//! Each operation is a self-contained module implementing the CodeTool
//! trait. A tool is a pure mapping from call arguments to a
//! `CompletionRequest` — template selection, parameter assembly, and
//! model defaulting. Rendering, caching, and retries all happen on the
//! other side of the dispatcher; tools carry none of that logic.

use crate::templates;
use codexbridge_core::{Completion, CompletionRequest, DispatchFailure, Error, Result};
use codexbridge_llm::{CancellationToken, Dispatcher};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One exposed operation.
pub trait CodeTool: Send + Sync {
    /// Unique operation name (e.g. "generate_code").
    fn name(&self) -> &'static str;

    /// Human-readable description shown in tools/list.
    fn description(&self) -> &'static str;

    /// JSON Schema for the call arguments.
    fn input_schema(&self) -> Value;

    /// Map call arguments to a fully populated request. Pure; fails only
    /// on bad arguments.
    fn prepare(&self, args: &Value, default_model: &str) -> Result<CompletionRequest>;
}

/// Failure from a tool call, annotated with the operation name.
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Argument or template errors — the backend was never consulted.
    #[error("{tool}: {source}")]
    Rejected {
        tool: String,
        #[source]
        source: Error,
    },

    /// Terminal dispatch failure after retries were exhausted.
    #[error("{tool}: {source}")]
    Failed {
        tool: String,
        #[source]
        source: DispatchFailure,
    },
}

impl ToolCallError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::Rejected { source, .. } => source.kind(),
            Self::Failed { source, .. } => source.kind(),
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Failed { source, .. } => source.attempts,
            _ => 0,
        }
    }

    pub fn correlation(&self) -> Option<uuid::Uuid> {
        match self {
            Self::Failed { source, .. } => Some(source.correlation),
            _ => None,
        }
    }
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn CodeTool>>,
    default_model: String,
}

impl ToolRegistry {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            tools: HashMap::new(),
            default_model: default_model.into(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: impl CodeTool + 'static) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CodeTool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Tool definitions for tools/list, sorted by name.
    pub fn definitions(&self) -> Vec<Value> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_unstable_by_key(|t| t.name());
        tools
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name(),
                    "description": t.description(),
                    "inputSchema": t.input_schema(),
                })
            })
            .collect()
    }

    /// Run one operation: prepare the request, render its template, and
    /// delegate to the dispatcher.
    pub async fn call(
        &self,
        name: &str,
        args: &Value,
        dispatcher: &Dispatcher,
        cancel: Option<CancellationToken>,
    ) -> std::result::Result<Completion, ToolCallError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;

        let request = tool
            .prepare(args, &self.default_model)
            .map_err(|source| ToolCallError::Rejected {
                tool: name.to_string(),
                source,
            })?;

        let prompt = templates::render(&request.template_id, &request.params).map_err(
            |source| ToolCallError::Rejected {
                tool: name.to_string(),
                source,
            },
        )?;

        debug!(tool = name, model = %request.model, "dispatching tool call");
        dispatcher
            .execute(&request, &prompt, cancel)
            .await
            .map_err(|source| ToolCallError::Failed {
                tool: name.to_string(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Argument helpers shared by the tool modules
// ---------------------------------------------------------------------------

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::invalid_argument(format!("missing required argument: {}", key)))
}

pub(crate) fn optional_str<'a>(args: &'a Value, key: &str, default: &'a str) -> &'a str {
    args.get(key).and_then(Value::as_str).unwrap_or(default)
}

pub(crate) fn model_arg(args: &Value, default_model: &str) -> String {
    optional_str(args, "model", default_model).to_string()
}
