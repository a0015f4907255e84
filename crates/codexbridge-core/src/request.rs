//! Request model and fingerprinting
//!
//! A `CompletionRequest` is built once per tool call and never mutated.
//! Its fingerprint is the cache key: a SHA-256 digest over the canonical
//! JSON encoding of the request. Parameters live in a `BTreeMap`, so two
//! requests with the same key/value pairs fingerprint identically no
//! matter the insertion order.

use crate::error::Error;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Knobs forwarded to the backend alongside the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A fully described backend call: which template, with which parameters,
/// against which model.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub template_id: String,
    pub params: BTreeMap<String, String>,
    pub model: String,
    pub options: BackendOptions,
}

impl CompletionRequest {
    pub fn new(template_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            params: BTreeMap::new(),
            model: model.into(),
            options: BackendOptions::default(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: BackendOptions) -> Self {
        self.options = options;
        self
    }

    /// Deterministic cache key for this request.
    pub fn fingerprint(&self) -> Fingerprint {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&canonical);
        Fingerprint(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }
}

/// SHA-256 hex digest identifying a request's semantic content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved backend response. Produced once per request, either from the
/// cache or from a fresh backend call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Backend attempts made; 0 when served from cache.
    pub attempts: u32,
    pub cached: bool,
    /// Correlates this response to the logged backend exchange.
    pub correlation: Uuid,
}

/// Terminal failure after the dispatcher gave up. Carries the last error,
/// how many attempts were made, and the log correlation id so operators
/// can find the raw backend exchange.
#[derive(Debug, thiserror::Error)]
#[error("{error} [attempts={attempts}, correlation={correlation}]")]
pub struct DispatchFailure {
    #[source]
    pub error: Error,
    pub attempts: u32,
    pub correlation: Uuid,
}

impl DispatchFailure {
    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}
