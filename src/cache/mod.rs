//! Memoization of expensive scorer calls
//!
//! Results are keyed by a `CacheKey` describing the logical inputs and stored
//! as JSON values in a `MemoStore`, either in memory or in a file that outlives
//! the process. Identical inputs always map to the identical stored output.

mod key;
mod store;

pub use key::{CacheKey, candidate_set_id};
pub use store::{JsonFileStore, MemoStore, MemoryStore};

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};

/// Memo cache with hit statistics
pub struct MemoCache {
    store: Box<dyn MemoStore>,
    hits: AtomicU64,
    lookups: AtomicU64,
}

impl MemoCache {
    #[must_use]
    pub fn new(store: Box<dyn MemoStore>) -> Self {
        Self {
            store,
            hits: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
        }
    }

    /// Cache held only in memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Return the stored result for `key`, computing and storing it if absent
    ///
    /// A stored value that no longer deserializes as `T` is recomputed and
    /// overwritten.
    ///
    /// # Errors
    /// Returns the error of `compute`, or a serialization error for the result.
    pub fn get_or_compute<T, F>(&self, key: &CacheKey, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        let digest = key.digest();
        self.lookups.fetch_add(1, Ordering::Relaxed);

        if let Some(stored) = self.store.get(&digest) {
            match serde_json::from_value(stored) {
                Ok(value) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(value);
                }
                Err(err) => log::warn!("Discarding cached value {digest}: {err}"),
            }
        }

        let value = compute()?;
        self.store.put(&digest, serde_json::to_value(&value)?);
        Ok(value)
    }

    /// Persist the underlying store
    ///
    /// # Errors
    /// Returns the store's I/O or serialization error.
    pub fn flush(&self) -> Result<()> {
        log::info!(
            "Memo cache hit rate {:.3} over {} lookups",
            self.hit_rate(),
            self.lookups()
        );
        self.store.flush()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Fraction of lookups answered from the store; zero before any lookup
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            return 0.0;
        }
        self.hits() as f64 / lookups as f64
    }

    /// Number of stored results
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl std::fmt::Debug for MemoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("entries", &self.len())
            .field("hits", &self.hits())
            .field("lookups", &self.lookups())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Alphabet, Word};
    use std::cell::Cell;

    fn key(argument: &str) -> CacheKey {
        let candidates = vec![Word::new("slate").unwrap(), Word::new("plate").unwrap()];
        CacheKey::new("test", 5, Alphabet::latin(), &[], &candidates, argument)
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = MemoCache::in_memory();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(1.5_f64)
        };

        assert_eq!(cache.get_or_compute(&key("trace"), compute).unwrap(), 1.5);
        assert_eq!(cache.get_or_compute(&key("trace"), compute).unwrap(), 1.5);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.lookups(), 2);
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn distinct_arguments_are_distinct_entries() {
        let cache = MemoCache::in_memory();
        cache.get_or_compute(&key("trace"), || Ok(1.0_f64)).unwrap();
        cache.get_or_compute(&key("grate"), || Ok(2.0_f64)).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn compute_errors_are_not_stored() {
        let cache = MemoCache::in_memory();
        let failed: Result<f64> = cache.get_or_compute(&key("trace"), || {
            Err(crate::error::Error::EmptyCandidateSet)
        });
        assert!(failed.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn mistyped_value_is_recomputed() {
        let cache = MemoCache::in_memory();
        cache
            .get_or_compute(&key("trace"), || Ok("text".to_string()))
            .unwrap();
        let value: f64 = cache.get_or_compute(&key("trace"), || Ok(3.0)).unwrap();
        assert_eq!(value, 3.0);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn hit_rate_is_zero_before_lookups() {
        assert_eq!(MemoCache::in_memory().hit_rate(), 0.0);
    }
}
