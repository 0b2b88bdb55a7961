//! Memoized resolution results.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use dashmap::DashMap;
use serde::Serialize;
use uischema_ir::{InstanceKey, Resolved};

/// Counters describing cache use since the engine was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

/// Resolution results keyed by default-filled instantiation.
///
/// Concurrent misses on the same key may both compose; the first insert wins
/// and every caller gets that entry back.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: DashMap<InstanceKey, Arc<Resolved>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &InstanceKey) -> Option<Arc<Resolved>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(instance = %key, "cache hit");
                Some(Arc::clone(entry.value()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert unless present; returns the stored entry.
    pub fn insert(&self, key: InstanceKey, resolved: Resolved) -> Arc<Resolved> {
        let entry = self.entries.entry(key).or_insert_with(|| Arc::new(resolved));
        Arc::clone(entry.value())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
