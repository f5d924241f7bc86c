//! Policy-agnostic memoization surface

use std::hash::Hash;

use crate::cache::CacheBox;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::key::{generic_key, CallArgs, KeyFn};
use crate::lru::LruCacheBox;
use crate::stats::CacheStats;

/// A callable that memoizes results by call arguments
pub trait Memoize<A> {
    /// Value produced by a call
    type Output;

    /// Call through the cache
    fn invoke(&mut self, args: A) -> Self::Output;

    /// Check whether a call's result is stored
    fn is_cached(&self, args: &A) -> bool;

    /// Drop the stored result for a call, if any
    fn invalidate(&mut self, args: &A);

    /// Number of stored results
    fn current_size(&self) -> usize;
}

impl<A, V, F, K, KF> Memoize<A> for CacheBox<A, V, F, K, KF>
where
    F: FnMut(A) -> V,
    V: Clone,
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    type Output = V;

    fn invoke(&mut self, args: A) -> V {
        CacheBox::invoke(self, args)
    }

    fn is_cached(&self, args: &A) -> bool {
        CacheBox::is_cached(self, args)
    }

    fn invalidate(&mut self, args: &A) {
        CacheBox::invalidate(self, args)
    }

    fn current_size(&self) -> usize {
        CacheBox::current_size(self)
    }
}

impl<A, V, F, K, KF> Memoize<A> for LruCacheBox<A, V, F, K, KF>
where
    F: FnMut(A) -> V,
    V: Clone,
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    type Output = V;

    fn invoke(&mut self, args: A) -> V {
        LruCacheBox::invoke(self, args)
    }

    fn is_cached(&self, args: &A) -> bool {
        LruCacheBox::is_cached(self, args)
    }

    fn invalidate(&mut self, args: &A) {
        LruCacheBox::invalidate(self, args)
    }

    fn current_size(&self) -> usize {
        LruCacheBox::current_size(self)
    }
}

/// Either caching policy, chosen at runtime from a [`CacheConfig`]
pub enum Memoized<A, V, F, K = String, KF = KeyFn<A, K>> {
    /// Keeps every result
    Unbounded(CacheBox<A, V, F, K, KF>),
    /// Keeps at most `max_size` results
    Bounded(LruCacheBox<A, V, F, K, KF>),
}

impl<A, V, F, K, KF> Memoized<A, V, F, K, KF>
where
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    /// Capacity of the bounded policy, `None` when unbounded
    pub fn max_size(&self) -> Option<usize> {
        match self {
            Memoized::Unbounded(_) => None,
            Memoized::Bounded(cache) => Some(cache.max_size()),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        match self {
            Memoized::Unbounded(cache) => cache.stats(),
            Memoized::Bounded(cache) => cache.stats(),
        }
    }
}

impl<A, V, F, K, KF> Memoize<A> for Memoized<A, V, F, K, KF>
where
    F: FnMut(A) -> V,
    V: Clone,
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    type Output = V;

    fn invoke(&mut self, args: A) -> V {
        match self {
            Memoized::Unbounded(cache) => cache.invoke(args),
            Memoized::Bounded(cache) => cache.invoke(args),
        }
    }

    fn is_cached(&self, args: &A) -> bool {
        match self {
            Memoized::Unbounded(cache) => cache.is_cached(args),
            Memoized::Bounded(cache) => cache.is_cached(args),
        }
    }

    fn invalidate(&mut self, args: &A) {
        match self {
            Memoized::Unbounded(cache) => cache.invalidate(args),
            Memoized::Bounded(cache) => cache.invalidate(args),
        }
    }

    fn current_size(&self) -> usize {
        match self {
            Memoized::Unbounded(cache) => cache.current_size(),
            Memoized::Bounded(cache) => cache.current_size(),
        }
    }
}

/// Wrap `func` using the policy selected by `config`, keying on every argument
///
/// # Returns
/// * `Result<Memoized>` - `Error::ZeroCapacity` for a bounded config with `max_size == 0`
pub fn cached_function<A, V, F>(func: F, config: &CacheConfig) -> Result<Memoized<A, V, F>>
where
    A: CallArgs,
    F: FnMut(A) -> V,
{
    cached_function_with_key(func, generic_key::<A> as KeyFn<A>, config)
}

/// Wrap `func` with a custom key function using the policy selected by `config`
pub fn cached_function_with_key<A, V, F, K, KF>(
    func: F,
    key_fn: KF,
    config: &CacheConfig,
) -> Result<Memoized<A, V, F, K, KF>>
where
    F: FnMut(A) -> V,
    K: Hash + Eq + Clone,
    KF: Fn(&A) -> K,
{
    if config.bounded {
        LruCacheBox::with_key_fn(func, key_fn, config.max_size).map(Memoized::Bounded)
    } else {
        Ok(Memoized::Unbounded(CacheBox::with_key_fn(func, key_fn)))
    }
}
