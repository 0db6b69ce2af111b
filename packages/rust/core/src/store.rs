//! Result cache keyed by normalized URL.
//!
//! The orchestrator only sees [`EnrichmentStore`]; [`MemoryStore`] is the
//! default process-local map. [`FlightGuard`] serializes work per key when
//! single-flight is enabled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::OwnedMutexGuard;

use scout_shared::{EnrichmentResult, NormalizedUrl};

// ---------------------------------------------------------------------------
// EnrichmentStore
// ---------------------------------------------------------------------------

/// Key-value store for finished enrichment results.
pub trait EnrichmentStore: Send + Sync {
    /// Cached result for `key`, if any.
    fn get(&self, key: &NormalizedUrl) -> Option<EnrichmentResult>;

    /// Store `result` under `key`, replacing any previous entry.
    fn put(&self, key: NormalizedUrl, result: EnrichmentResult);
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Unbounded in-memory store. No eviction, no TTL; last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<NormalizedUrl, EnrichmentResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached URLs.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnrichmentStore for MemoryStore {
    fn get(&self, key: &NormalizedUrl) -> Option<EnrichmentResult> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: NormalizedUrl, result: EnrichmentResult) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, result);
    }
}

// ---------------------------------------------------------------------------
// FlightGuard
// ---------------------------------------------------------------------------

/// Per-key async locks. Holding the permit for a key means no other caller
/// holding a permit for the same key is running.
#[derive(Debug, Default)]
pub struct FlightGuard {
    locks: Mutex<HashMap<NormalizedUrl, Arc<tokio::sync::Mutex<()>>>>,
}

/// Held for the duration of one keyed fetch.
pub struct FlightPermit<'a> {
    guard: &'a FlightGuard,
    key: NormalizedUrl,
    _permit: OwnedMutexGuard<()>,
}

impl FlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other permit for `key` is held.
    pub async fn acquire(&self, key: &NormalizedUrl) -> FlightPermit<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key.clone()).or_default().clone()
        };

        let permit = lock.lock_owned().await;

        FlightPermit {
            guard: self,
            key: key.clone(),
            _permit: permit,
        }
    }

    /// Keys with a live lock entry.
    pub fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        let mut locks = self.guard.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map plus the one inside our own permit:
        // nobody else is queued, so the entry can go.
        if let Some(lock) = locks.get(&self.key) {
            if Arc::strong_count(lock) <= 2 {
                locks.remove(&self.key);
            }
        }
    }
}
