//! Codexbridge LLM - Backend transports, response cache, and dispatch

pub mod backend;
pub mod cache;
pub mod cli;
pub mod dispatch;
pub mod http;

pub use backend::{select_backend, CompletionBackend};
pub use cache::{CacheConfig, ResponseCache};
pub use cli::CodexCli;
pub use dispatch::{Dispatcher, RetryPolicy};
pub use http::OpenAiHttp;
pub use tokio_util::sync::CancellationToken;
