//! CacheBox: unbounded memoization of a computation

use std::hash::Hash;
use std::marker::PhantomData;
use memostore::OrderedStore;
use tracing::{debug, trace};

use crate::error::Result;
use crate::key::{generic_key, CallArgs, KeyFn};
use crate::stats::CacheStats;

/// Wraps a computation and remembers every result it produces
///
/// Each distinct key is computed at most once until it is invalidated.
pub struct CacheBox<A, V, F, K = String, KF = KeyFn<A, K>> {
    /// Wrapped computation
    func: F,

    /// Derives the cache key from call arguments
    key_fn: KF,

    /// Computed values by key
    store: OrderedStore<K, V>,

    /// Cache statistics
    stats: CacheStats,

    _args: PhantomData<fn(A)>,
}

impl<A, V, F> CacheBox<A, V, F>
where
    A: CallArgs,
{
    /// Wrap `func`, keying on every argument via [`generic_key`]
    pub fn new(func: F) -> Self
    where
        F: FnMut(A) -> V,
    {
        Self::from_parts(func, generic_key::<A> as KeyFn<A>)
    }

    /// Wrap a computation that can fail; only `Ok` values are cached
    pub fn fallible<E>(func: F) -> Self
    where
        F: FnMut(A) -> std::result::Result<V, E>,
    {
        Self::from_parts(func, generic_key::<A> as KeyFn<A>)
    }
}

impl<A, V, F, K, KF> CacheBox<A, V, F, K, KF>
where
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    /// Wrap `func` with a custom key function
    pub fn with_key_fn(func: F, key_fn: KF) -> Self
    where
        F: FnMut(A) -> V,
    {
        Self::from_parts(func, key_fn)
    }

    /// Wrap a fallible computation with a custom key function
    pub fn fallible_with_key_fn<E>(func: F, key_fn: KF) -> Self
    where
        F: FnMut(A) -> std::result::Result<V, E>,
    {
        Self::from_parts(func, key_fn)
    }

    fn from_parts(func: F, key_fn: KF) -> Self {
        Self {
            func,
            key_fn,
            store: OrderedStore::new(),
            stats: CacheStats::new(),
            _args: PhantomData,
        }
    }

    /// Compute the cache key for a call
    pub fn cache_key(&self, args: &A) -> K {
        (self.key_fn)(args)
    }

    /// Check whether a call's result is already stored
    pub fn is_cached(&self, args: &A) -> bool {
        self.store.contains(&self.cache_key(args))
    }

    /// Drop the stored result for a call, if any
    pub fn invalidate(&mut self, args: &A) {
        let key = self.cache_key(args);
        if self.store.remove(&key).is_some() {
            self.stats.record_invalidation();
            debug!(size = self.store.len(), "Invalidated cache entry");
        }
    }

    /// Strict lookup of a stored result without computing
    ///
    /// # Returns
    /// * `Result<&V>` - Stored value, or `Error::Store(KeyNotFound)`
    pub fn cached(&self, args: &A) -> Result<&V> {
        Ok(self.store.get(&self.cache_key(args))?)
    }

    /// Call the computation, answering from the store when possible
    pub fn invoke(&mut self, args: A) -> V
    where
        F: FnMut(A) -> V,
        V: Clone,
    {
        let key = self.cache_key(&args);
        if let Some(value) = self.lookup(&key) {
            return value;
        }

        self.stats.record_miss();
        let value = (self.func)(args);
        self.insert(key, value.clone());
        value
    }

    /// Call a fallible computation
    ///
    /// Errors are returned unchanged and leave the store untouched.
    pub fn try_invoke<E>(&mut self, args: A) -> std::result::Result<V, E>
    where
        F: FnMut(A) -> std::result::Result<V, E>,
        V: Clone,
    {
        let key = self.cache_key(&args);
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }

        self.stats.record_miss();
        let value = (self.func)(args)?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Get the number of stored results
    pub fn current_size(&self) -> usize {
        self.store.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drop every stored result and reset statistics
    pub fn clear(&mut self) {
        self.store.clear();
        self.stats.reset();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Read-only view of the stored results, oldest first
    pub fn store(&self) -> &OrderedStore<K, V> {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut OrderedStore<K, V> {
        &mut self.store
    }

    fn lookup(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let value = self.store.try_get(key)?.clone();
        self.stats.record_hit();
        trace!(size = self.store.len(), "Cache hit");
        Some(value)
    }

    fn insert(&mut self, key: K, value: V) {
        self.store.put(key, value);
        self.stats.record_insert();
        debug!(size = self.store.len(), "Cache miss, stored computed value");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::key::single_arg_key;
    use std::cell::Cell;

    #[test]
    fn test_cache_simple() {
        let calls = Cell::new(0);
        let mut cached = CacheBox::new(|()| {
            calls.set(calls.get() + 1);
            calls.get()
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(cached.invoke(()), 1);

        // Value does not change
        assert_eq!(cached.invoke(()), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(cached.invoke(()), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_cache_is_cached() {
        let mut cached = CacheBox::new(|x: u32| x);

        assert!(!cached.is_cached(&5));
        assert_eq!(cached.invoke(5), 5);
        assert!(cached.is_cached(&5));
        assert!(!cached.is_cached(&4));
    }

    #[test]
    fn test_cache_invalidate() {
        let calls = Cell::new(0);
        let mut cached = CacheBox::new(|x: u32| {
            calls.set(calls.get() + 1);
            x
        });

        assert_eq!(cached.invoke(5), 5);
        assert!(cached.is_cached(&5));

        cached.invalidate(&5);
        assert!(!cached.is_cached(&5));

        assert_eq!(cached.invoke(5), 5);
        assert!(cached.is_cached(&5));
        assert_eq!(calls.get(), 2);
        assert_eq!(cached.stats().invalidations(), 1);
    }

    #[test]
    fn test_invalidate_absent_is_noop() {
        let mut cached = CacheBox::new(|x: u32| x);

        cached.invalidate(&1);
        assert_eq!(cached.current_size(), 0);
        assert_eq!(cached.stats().invalidations(), 0);
    }

    #[test]
    fn test_key_discrimination() {
        let mut cached = CacheBox::new(|(a, b): (u32, u32)| a * 10 + b);

        assert_eq!(cached.invoke((1, 2)), 12);
        assert_eq!(cached.invoke((2, 1)), 21);
        assert_eq!(cached.current_size(), 2);

        cached.invalidate(&(1, 2));
        assert!(!cached.is_cached(&(1, 2)));
        assert!(cached.is_cached(&(2, 1)));
    }

    #[test]
    fn test_single_arg_key_fn() {
        let calls = Cell::new(0);
        let mut cached = CacheBox::with_key_fn(
            |(x, _context): (u32, &str)| {
                calls.set(calls.get() + 1);
                x * 2
            },
            single_arg_key,
        );

        assert_eq!(cached.invoke((3, "first")), 6);
        assert_eq!(cached.invoke((3, "second")), 6);
        assert_eq!(calls.get(), 1);
        assert!(cached.is_cached(&(3, "anything")));
        assert_eq!(cached.cache_key(&(3, "x")), "3");
    }

    #[test]
    fn test_custom_key_type() {
        let mut cached = CacheBox::with_key_fn(|s: String| s.len(), |s: &String| s.to_lowercase());

        assert_eq!(cached.invoke("Hello".to_string()), 5);
        assert!(cached.is_cached(&"HELLO".to_string()));
        assert_eq!(cached.store().keys().collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn test_cached_strict_lookup() {
        let mut cached = CacheBox::new(|x: u32| x + 1);

        assert!(matches!(
            cached.cached(&1),
            Err(Error::Store(memostore::Error::KeyNotFound))
        ));

        cached.invoke(1);
        assert_eq!(cached.cached(&1).unwrap(), &2);
    }

    #[test]
    fn test_try_invoke_error_not_cached() {
        let calls = Cell::new(0);
        let mut cached = CacheBox::fallible(|x: i32| {
            calls.set(calls.get() + 1);
            if x < 0 {
                Err(format!("negative input: {}", x))
            } else {
                Ok(x * 2)
            }
        });

        assert_eq!(cached.try_invoke(-1), Err("negative input: -1".to_string()));
        assert!(!cached.is_cached(&-1));
        assert_eq!(cached.current_size(), 0);

        assert_eq!(cached.try_invoke(-1), Err("negative input: -1".to_string()));
        assert_eq!(calls.get(), 2);

        assert_eq!(cached.try_invoke(4), Ok(8));
        assert_eq!(cached.try_invoke(4), Ok(8));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_cache_stats() {
        let mut cached = CacheBox::new(|x: u32| x);

        cached.invoke(1); // miss
        cached.invoke(1); // hit
        cached.invoke(2); // miss
        cached.invoke(2); // hit

        assert_eq!(cached.stats().hits(), 2);
        assert_eq!(cached.stats().misses(), 2);
        assert_eq!(cached.stats().inserts(), 2);
        assert_eq!(cached.stats().hit_ratio(), 0.5);
    }

    #[test]
    fn test_cache_clear() {
        let mut cached = CacheBox::new(|x: u32| x);

        cached.invoke(1);
        cached.invoke(2);
        assert_eq!(cached.current_size(), 2);

        cached.clear();

        assert_eq!(cached.current_size(), 0);
        assert!(cached.is_empty());
        assert_eq!(cached.stats().misses(), 0);
    }
}
