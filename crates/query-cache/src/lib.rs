//! # Query Result Cache
//!
//! A process-lifetime memoization layer for the screener's query operations.
//! Results are keyed by `(operation name, serialized argument tuple)`:
//! repeated calls with identical arguments return the previously computed
//! value without recomputation. There is no eviction; the cache lives as long
//! as the process, mirroring the recompute-avoiding cache the engine is
//! specified against.
//!
//! The cache deliberately wraps the core instead of being baked into it: the
//! analytics functions stay pure, and this crate owns all memoization state.

use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::trace;

pub mod error;

pub use error::CacheError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    operation: &'static str,
    args: String,
}

/// A function-result cache keyed by operation name and argument tuple.
///
/// Values are stored type-erased behind `Arc<dyn Any>`; each operation name
/// must always be used with the same result type. Interior locking keeps the
/// public surface `&self`, so one cache can be shared by every query of a
/// session.
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, Arc<dyn Any + Send + Sync>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `(operation, args)`, computing and
    /// storing it on first use.
    ///
    /// `compute` runs outside the cache lock, so a fallible computation that
    /// errors leaves no entry behind and will be retried on the next call.
    pub fn get_or_compute<A, T, E, F>(
        &self,
        operation: &'static str,
        args: &A,
        compute: F,
    ) -> Result<Arc<T>, E>
    where
        A: Serialize,
        T: Any + Send + Sync,
        E: From<CacheError>,
        F: FnOnce() -> Result<T, E>,
    {
        let key = CacheKey {
            operation,
            args: serde_json::to_string(args).map_err(CacheError::from)?,
        };

        if let Some(entry) = self.lookup(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(operation, "query cache hit");
            return entry
                .downcast::<T>()
                .map_err(|_| CacheError::TypeMismatch(operation).into());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(operation, "query cache miss");
        let value = Arc::new(compute()?);
        self.store(key, value.clone());
        Ok(value)
    }

    /// The number of lookups answered from the cache so far.
    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// The number of lookups that required computation so far.
    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<dyn Any + Send + Sync>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn store(&self, key: CacheKey, value: Arc<dyn Any + Send + Sync>) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, value);
    }
}
