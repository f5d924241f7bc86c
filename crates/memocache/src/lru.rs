//! LruCacheBox: memoization capped at a maximum entry count
//!
//! Eviction follows insertion order. A hit does not refresh an entry, so the
//! first key computed is the first key dropped once the cache overflows.

use std::hash::Hash;
use std::num::NonZeroUsize;
use memostore::OrderedStore;
use tracing::debug;

use crate::cache::CacheBox;
use crate::config::DEFAULT_MAX_SIZE;
use crate::error::{Error, Result};
use crate::key::{CallArgs, KeyFn};
use crate::stats::CacheStats;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_SIZE) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be non-zero"),
};

/// Bounded [`CacheBox`] that evicts its oldest-inserted entries on overflow
pub struct LruCacheBox<A, V, F, K = String, KF = KeyFn<A, K>> {
    inner: CacheBox<A, V, F, K, KF>,
    max_size: NonZeroUsize,
}

impl<A, V, F> LruCacheBox<A, V, F>
where
    A: CallArgs,
{
    /// Wrap `func` with the default capacity of 1000 entries
    pub fn new(func: F) -> Self
    where
        F: FnMut(A) -> V,
    {
        Self {
            inner: CacheBox::new(func),
            max_size: DEFAULT_CAPACITY,
        }
    }

    /// Wrap `func`, keeping at most `max_size` results
    ///
    /// # Returns
    /// * `Result<LruCacheBox>` - `Error::ZeroCapacity` when `max_size` is 0
    pub fn with_max_size(func: F, max_size: usize) -> Result<Self>
    where
        F: FnMut(A) -> V,
    {
        Self::bounded(CacheBox::new(func), max_size)
    }

    /// Wrap a fallible computation, keeping at most `max_size` results
    pub fn fallible<E>(func: F, max_size: usize) -> Result<Self>
    where
        F: FnMut(A) -> std::result::Result<V, E>,
    {
        Self::bounded(CacheBox::fallible(func), max_size)
    }
}

impl<A, V, F, K, KF> LruCacheBox<A, V, F, K, KF>
where
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    /// Wrap `func` with a custom key function, keeping at most `max_size` results
    pub fn with_key_fn(func: F, key_fn: KF, max_size: usize) -> Result<Self>
    where
        F: FnMut(A) -> V,
    {
        Self::bounded(CacheBox::with_key_fn(func, key_fn), max_size)
    }

    /// Fallible variant of [`with_key_fn`](Self::with_key_fn)
    pub fn fallible_with_key_fn<E>(func: F, key_fn: KF, max_size: usize) -> Result<Self>
    where
        F: FnMut(A) -> std::result::Result<V, E>,
    {
        Self::bounded(CacheBox::fallible_with_key_fn(func, key_fn), max_size)
    }

    fn bounded(inner: CacheBox<A, V, F, K, KF>, max_size: usize) -> Result<Self> {
        let max_size = NonZeroUsize::new(max_size).ok_or(Error::ZeroCapacity)?;
        Ok(Self { inner, max_size })
    }

    /// Maximum number of stored results
    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }

    /// Get the number of stored results
    pub fn current_size(&self) -> usize {
        self.inner.current_size()
    }

    /// Compute the cache key for a call
    pub fn cache_key(&self, args: &A) -> K {
        self.inner.cache_key(args)
    }

    /// Check whether a call's result is already stored
    pub fn is_cached(&self, args: &A) -> bool {
        self.inner.is_cached(args)
    }

    /// Drop the stored result for a call, if any
    pub fn invalidate(&mut self, args: &A) {
        self.inner.invalidate(args);
    }

    /// Strict lookup of a stored result without computing
    pub fn cached(&self, args: &A) -> Result<&V> {
        self.inner.cached(args)
    }

    /// Call the computation, then evict down to `max_size`
    pub fn invoke(&mut self, args: A) -> V
    where
        F: FnMut(A) -> V,
        V: Clone,
    {
        let value = self.inner.invoke(args);
        self.check_size();
        value
    }

    /// Call a fallible computation, then evict down to `max_size`
    pub fn try_invoke<E>(&mut self, args: A) -> std::result::Result<V, E>
    where
        F: FnMut(A) -> std::result::Result<V, E>,
        V: Clone,
    {
        let result = self.inner.try_invoke(args);
        self.check_size();
        result
    }

    /// Drop every stored result and reset statistics
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        self.inner.stats()
    }

    /// Read-only view of the stored results, oldest first
    pub fn store(&self) -> &OrderedStore<K, V> {
        self.inner.store()
    }

    fn check_size(&mut self) {
        while self.current_size() > self.max_size.get() {
            // Over a non-zero capacity, so the store cannot be empty
            if let Err(err) = self.inner.store_mut().pop_oldest() {
                unreachable!("eviction from an over-capacity store failed: {}", err);
            }
            self.inner.stats().record_eviction();
            debug!(
                size = self.current_size(),
                max_size = self.max_size.get(),
                "Evicted oldest cache entry"
            );
        }
    }
}
