//! Backend trait and transport selection

use crate::cli::CodexCli;
use crate::http::OpenAiHttp;
use codexbridge_core::{BackendOptions, Config, Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// A completion transport. Both the subprocess CLI and the HTTP API
/// normalize into this shape: prompt in, raw completion text out.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one completion. If `cancel` is provided and triggered, the call
    /// is abandoned (subprocess killed, HTTP connection dropped).
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        options: &BackendOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<String>;
}

/// Pick the transport once at startup: the codex CLI when its binary is
/// resolvable and not disabled by config, otherwise the HTTP API when an
/// API key is configured.
pub fn select_backend(config: &Config) -> Result<Arc<dyn CompletionBackend>> {
    if config.prefer_cli {
        if let Some(binary) = resolve_codex_binary(config) {
            info!("using codex CLI backend: {}", binary.display());
            return Ok(Arc::new(CodexCli::new(binary)));
        }
    }

    if let Some(api_key) = &config.openai_api_key {
        info!("using OpenAI HTTP backend: {}", config.openai_base_url);
        return Ok(Arc::new(OpenAiHttp::new(api_key, &config.openai_base_url)));
    }

    Err(Error::BackendUnavailable(
        "codex binary not found and OPENAI_API_KEY not set; install the CLI with \
         `npm i -g @openai/codex` or configure an API key"
            .to_string(),
    ))
}

/// Locate the codex binary: explicit `CODEX_PATH` wins, then a PATH scan.
pub fn resolve_codex_binary(config: &Config) -> Option<PathBuf> {
    if let Some(path) = &config.codex_path {
        if path.is_file() {
            return Some(path.clone());
        }
        return None;
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join("codex");
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
