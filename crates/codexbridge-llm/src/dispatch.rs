//! Dispatcher — cache consultation, per-attempt timeout, retry with backoff
//!
//! The one piece of multi-step control flow in the system. A request either
//! resolves from the cache, succeeds against the backend within
//! `max_retries` attempts, or surfaces a terminal `DispatchFailure` carrying
//! the last error, the attempt count, and the correlation id under which
//! the raw exchange was logged.

use crate::backend::CompletionBackend;
use crate::cache::ResponseCache;
use codexbridge_core::{Completion, CompletionRequest, Config, DispatchFailure, Error};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Target for raw backend exchange logging; operators grep this.
const EXCHANGE_TARGET: &str = "codexbridge::exchange";

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total backend attempts, first call included.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            factor: 2.0,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base × factor^(retry−1),
    /// capped at `max_delay`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let millis = self.base_delay.as_millis() as f64 * self.factor.powi(exp);
        let capped = millis.min(self.max_delay.as_millis() as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }
}

pub struct Dispatcher {
    backend: Arc<dyn CompletionBackend>,
    cache: ResponseCache,
    retry: RetryPolicy,
    request_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        cache: ResponseCache,
        retry: RetryPolicy,
        request_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            cache,
            retry,
            request_timeout,
        }
    }

    pub fn from_config(backend: Arc<dyn CompletionBackend>, config: &Config) -> Self {
        Self::new(
            backend,
            ResponseCache::new(crate::cache::CacheConfig::from_config(config)),
            RetryPolicy {
                max_retries: config.max_retries,
                base_delay: config.backoff_base,
                factor: config.backoff_factor,
                max_delay: Duration::from_secs(30),
            },
            config.request_timeout,
        )
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Resolve a request: cache hit, or backend call with timeout/retry.
    pub async fn execute(
        &self,
        request: &CompletionRequest,
        prompt: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<Completion, DispatchFailure> {
        let correlation = Uuid::new_v4();
        let fingerprint = request.fingerprint();

        if let Some(text) = self.cache.get(&fingerprint) {
            debug!(%correlation, %fingerprint, "cache hit");
            return Ok(Completion {
                text,
                attempts: 0,
                cached: true,
                correlation,
            });
        }

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if attempts > 1 {
                let delay = self.retry.backoff(attempts - 1);
                debug!(
                    %correlation,
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            info!(
                target: EXCHANGE_TARGET,
                %correlation,
                attempt = attempts,
                model = %request.model,
                template = %request.template_id,
                prompt = %prompt,
                "backend request"
            );

            let attempt_result = match tokio::time::timeout(
                self.request_timeout,
                self.backend
                    .complete(prompt, &request.model, &request.options, cancel.clone()),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout {
                    elapsed_ms: self.request_timeout.as_millis() as u64,
                }),
            };

            match attempt_result {
                Ok(text) => {
                    info!(
                        target: EXCHANGE_TARGET,
                        %correlation,
                        attempt = attempts,
                        response = %text,
                        "backend response"
                    );
                    self.cache.put(&fingerprint, text.clone());
                    return Ok(Completion {
                        text,
                        attempts,
                        cached: false,
                        correlation,
                    });
                }
                Err(err)
                    if err.is_transient()
                        && attempts < self.retry.max_retries
                        && !is_cancelled(&cancel) =>
                {
                    warn!(
                        %correlation,
                        attempt = attempts,
                        error = %err,
                        "transient backend failure, retrying"
                    );
                }
                Err(err) => {
                    error!(%correlation, attempts, error = %err, "backend call failed");
                    return Err(DispatchFailure {
                        error: err,
                        attempts,
                        correlation,
                    });
                }
            }
        }
    }
}

fn is_cancelled(cancel: &Option<CancellationToken>) -> bool {
    cancel.as_ref().map(|c| c.is_cancelled()).unwrap_or(false)
}
