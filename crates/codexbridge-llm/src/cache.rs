//! Response cache
//!
//! Fingerprint → text, with lazy TTL expiry. Writes are idempotent (same
//! fingerprint maps to the same logical value), so concurrent misses that
//! race on `put` are harmless. No size-based eviction: the corpus of
//! practical prompts is operator-bounded.

use codexbridge_core::{Config, Fingerprint};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.cache_enabled,
            ttl: config.cache_ttl,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl: Duration::ZERO,
        }
    }
}

struct CacheEntry {
    text: String,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

pub struct ResponseCache {
    config: CacheConfig,
    entries: DashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
        }
    }

    /// Cached text for this fingerprint, if present and not past its TTL.
    /// Expired entries are removed on the way out.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        let expired = match self.entries.get(fingerprint.as_str()) {
            Some(entry) if !entry.is_expired() => return Some(entry.text.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            // Guard re-checks expiry so a concurrent fresh insert survives.
            self.entries
                .remove_if(fingerprint.as_str(), |_, e| e.is_expired());
            debug!(fingerprint = %fingerprint, "evicted expired cache entry");
        }
        None
    }

    pub fn put(&self, fingerprint: &Fingerprint, text: impl Into<String>) {
        if !self.config.enabled {
            return;
        }
        self.entries.insert(
            fingerprint.as_str().to_string(),
            CacheEntry {
                text: text.into(),
                created_at: Instant::now(),
                ttl: self.config.ttl,
            },
        );
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
