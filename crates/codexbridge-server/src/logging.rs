//! Logging bootstrap
//!
//! Everything goes to rotating daily files, never to stdout/stderr — the
//! stdio streams carry JSON-RPC frames and must stay clean. The returned
//! guard must be held for the process lifetime or buffered log lines are
//! lost on shutdown.

use codexbridge_core::Config;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(config: &Config) -> anyhow::Result<WorkerGuard> {
    let log_dir = resolve_log_dir(config)?;
    let appender = tracing_appender::rolling::daily(&log_dir, "codexbridge.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

/// Log directory: explicit override, then ~/.codexbridge/logs, then a
/// local fallback when the home directory is unusable.
fn resolve_log_dir(config: &Config) -> std::io::Result<PathBuf> {
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
        return Ok(dir.clone());
    }

    if let Some(home) = dirs::home_dir() {
        let candidate = home.join(".codexbridge").join("logs");
        if std::fs::create_dir_all(&candidate).is_ok() {
            return Ok(candidate);
        }
    }

    let fallback = PathBuf::from(".codexbridge.logs");
    std::fs::create_dir_all(&fallback)?;
    Ok(fallback)
}
