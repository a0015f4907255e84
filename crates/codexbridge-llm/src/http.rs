//! OpenAI HTTP transport
//!
//! Issues a chat-completion request and normalizes the reply into plain
//! text. Model-family quirks (the reasoning models pin their sampling
//! temperature and take their token cap under a different field name)
//! live in a small lookup table rather than in the callers.

use crate::backend::CompletionBackend;
use codexbridge_core::{BackendOptions, Error, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Per-family parameter adjustments consulted when building a request.
#[derive(Debug)]
pub struct ModelFamily {
    pub name: &'static str,
    prefixes: &'static [&'static str],
    /// Some families reject any temperature other than this one.
    pub fixed_temperature: Option<f64>,
    /// Field name carrying the response-length cap.
    pub max_tokens_field: &'static str,
    pub default_max_tokens: u32,
}

static REASONING_FAMILY: ModelFamily = ModelFamily {
    name: "reasoning",
    prefixes: &["o1", "o3", "o4"],
    fixed_temperature: Some(1.0),
    max_tokens_field: "max_completion_tokens",
    default_max_tokens: 8192,
};

static DEFAULT_FAMILY: ModelFamily = ModelFamily {
    name: "default",
    prefixes: &[],
    fixed_temperature: None,
    max_tokens_field: "max_tokens",
    default_max_tokens: 4096,
};

pub fn family_for(model: &str) -> &'static ModelFamily {
    if REASONING_FAMILY
        .prefixes
        .iter()
        .any(|p| model.starts_with(p))
    {
        &REASONING_FAMILY
    } else {
        &DEFAULT_FAMILY
    }
}

/// Build the JSON body for a chat-completion call, applying family quirks.
pub fn build_request_body(model: &str, prompt: &str, options: &BackendOptions) -> Value {
    let family = family_for(model);
    let temperature = family
        .fixed_temperature
        .unwrap_or_else(|| options.temperature.unwrap_or(DEFAULT_TEMPERATURE));
    let max_tokens = options.max_tokens.unwrap_or(family.default_max_tokens);

    let mut body = json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
        "temperature": temperature,
    });
    body[family.max_tokens_field] = json!(max_tokens);
    body
}

pub struct OpenAiHttp {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiHttp {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    async fn send(&self, body: &Value) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            let detail = response.text().await.unwrap_or_default();
            error!("OpenAI error {}: {}", status, detail);

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => Error::RateLimited { retry_after_ms },
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::BackendUnavailable(
                    format!("OpenAI API rejected credentials ({})", status),
                ),
                _ => Error::Transport(format!("{}: {}", status, truncate(&detail, 500))),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(format!("invalid JSON from OpenAI: {}", e)))?;

        parse_completion_payload(&payload)
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiHttp {
    fn name(&self) -> &'static str {
        "openai-http"
    }

    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        options: &BackendOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<String> {
        let body = build_request_body(model, prompt, options);
        debug!("OpenAI request: model={} family={}", model, family_for(model).name);

        match cancel {
            Some(token) => tokio::select! {
                result = self.send(&body) => result,
                _ = token.cancelled() => Err(Error::Transport("request cancelled".to_string())),
            },
            None => self.send(&body).await,
        }
    }
}

/// Pull the completion text out of a chat-completion response body.
pub fn parse_completion_payload(payload: &Value) -> Result<String> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim_start_matches('\n').to_string())
        .ok_or_else(|| {
            Error::InvalidResponse("OpenAI response missing choices[0].message.content".to_string())
        })
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout { elapsed_ms: 0 }
    } else {
        Error::Transport(e.to_string())
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
