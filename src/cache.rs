//! LRU result cache with TTL
//!
//! Caches screening results to avoid repeated provider lookups.
//! - Key: `TokenId`
//! - Per-entry TTL, checked on read and swept by a background task
//! - LRU eviction under capacity pressure
//!
//! The cache is the sole owner of stored entries; `get` hands out clones,
//! never references. Reads never touch the network.

use crate::config::CacheConfig;
use crate::models::{ScreeningResult, TokenId};
use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cache entry with expiry for TTL checking
#[derive(Clone)]
struct CacheEntry {
    result: ScreeningResult,
    expires_at: DateTime<Utc>,
}

/// LRU + TTL cache for screening results
pub struct ResultCache {
    /// The underlying LRU cache
    cache: Mutex<LruCache<TokenId, CacheEntry>>,
    /// TTL applied by `put_default`
    default_ttl: Duration,
    /// Interval between background sweeps
    cleanup_interval: std::time::Duration,
}

impl ResultCache {
    /// Create a new result cache from configuration
    pub fn new(config: &CacheConfig) -> Self {
        let cap = NonZeroUsize::new(config.max_entries)
            .unwrap_or_else(|| NonZeroUsize::new(1000).unwrap());
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            default_ttl: Duration::seconds(config.ttl_seconds as i64),
            cleanup_interval: std::time::Duration::from_secs(config.cleanup_interval_seconds),
        }
    }

    /// Get a cached result if it exists and has not expired
    pub fn get(&self, token: &TokenId) -> Option<ScreeningResult> {
        let mut cache = self.cache.lock();

        if let Some(entry) = cache.get(token) {
            if Utc::now() < entry.expires_at {
                tracing::trace!(token = %token, "Cache hit");
                return Some(entry.result.clone());
            }
            tracing::trace!(token = %token, "Cache entry expired");
            cache.pop(token);
        }

        None
    }

    /// Insert a result with an explicit TTL
    pub fn put(&self, token: TokenId, result: ScreeningResult, ttl: Duration) {
        let entry = CacheEntry {
            result,
            expires_at: Utc::now() + ttl,
        };

        let mut cache = self.cache.lock();
        cache.put(token.clone(), entry);

        tracing::trace!(token = %token, "Cache insert");
    }

    /// Insert a result with the configured default TTL
    pub fn put_default(&self, token: TokenId, result: ScreeningResult) {
        self.put(token, result, self.default_ttl);
    }

    /// Remove an entry from the cache
    pub fn invalidate(&self, token: &TokenId) {
        let mut cache = self.cache.lock();
        cache.pop(token);
        tracing::trace!(token = %token, "Cache invalidate");
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
        tracing::debug!("Cache cleared");
    }

    /// Current number of entries, including not-yet-swept expired ones
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            entries: cache.len(),
            capacity: cache.cap().get(),
        }
    }

    /// Drop every expired entry. Called by the background sweep so memory
    /// stays bounded even for tokens never looked up again.
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut cache = self.cache.lock();

        let expired: Vec<TokenId> = cache
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(token, _)| token.clone())
            .collect();

        for token in &expired {
            cache.pop(token);
        }

        if !expired.is_empty() {
            tracing::debug!(swept = expired.len(), "Swept expired cache entries");
        }
        expired.len()
    }

    /// Start the periodic cleanup task. Returns a handle that must be used
    /// to shut the task down; dropping the handle leaves the task running.
    pub fn spawn_cleanup(self: &Arc<Self>) -> CleanupHandle {
        let cache = Arc::clone(self);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let interval = self.cleanup_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        tracing::debug!("Cache cleanup task shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        cache.sweep_expired();
                    }
                }
            }
        });

        CleanupHandle { cancel, task }
    }
}

/// Handle controlling the background cleanup task
pub struct CleanupHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Stop the cleanup task and wait for it to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
}
