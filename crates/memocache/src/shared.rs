//! SharedCache: a memoizing cache usable from several threads

use std::sync::Arc;
use parking_lot::Mutex;

use crate::memoize::Memoize;

/// Cloneable handle to a cache guarded by a mutex
///
/// The lock is held while the wrapped computation runs, so concurrent calls
/// with the same key still compute at most once.
pub struct SharedCache<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> SharedCache<C> {
    /// Share `cache` behind a mutex
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Call through the cache
    pub fn invoke<A>(&self, args: A) -> <C as Memoize<A>>::Output
    where
        C: Memoize<A>,
    {
        self.inner.lock().invoke(args)
    }

    /// Check whether a call's result is stored
    pub fn is_cached<A>(&self, args: &A) -> bool
    where
        C: Memoize<A>,
    {
        self.inner.lock().is_cached(args)
    }

    /// Drop the stored result for a call, if any
    pub fn invalidate<A>(&self, args: &A)
    where
        C: Memoize<A>,
    {
        self.inner.lock().invalidate(args)
    }

    /// Run `f` with exclusive access to the cache
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }
}

impl<C> Clone for SharedCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
