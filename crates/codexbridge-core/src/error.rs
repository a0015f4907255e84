//! Error types for Codexbridge

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("template '{template}' is missing parameter(s): {}", .names.join(", "))]
    MissingParameter { template: String, names: Vec<String> },

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("no usable backend: {0}")]
    BackendUnavailable(String),

    #[error("backend call timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("rate limited by backend{}", fmt_retry_after(.retry_after_ms))]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn fmt_retry_after(retry_after_ms: &Option<u64>) -> String {
    match retry_after_ms {
        Some(ms) => format!(", retry after {}ms", ms),
        None => String::new(),
    }
}

impl Error {
    /// Whether the dispatcher may retry the request after this failure.
    /// Everything else is terminal and surfaces to the caller immediately.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Timeout { .. } | Error::RateLimited { .. } | Error::Transport(_)
        )
    }

    /// Stable machine-readable kind, used in RPC error payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingParameter { .. } => "missing_parameter",
            Error::UnknownTemplate(_) => "unknown_template",
            Error::BackendUnavailable(_) => "backend_unavailable",
            Error::Timeout { .. } => "timeout",
            Error::RateLimited { .. } => "rate_limited",
            Error::InvalidResponse(_) => "invalid_response",
            Error::Transport(_) => "transport",
            Error::UnknownTool(_) => "unknown_tool",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }

    pub fn missing_parameter(template: impl Into<String>, names: Vec<String>) -> Self {
        Self::MissingParameter {
            template: template.into(),
            names,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
