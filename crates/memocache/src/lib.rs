//! # memocache
//!
//! Function-level memoization: wrap a computation, derive a key from each
//! call's arguments, and answer repeated calls from a store instead of
//! recomputing.
//!
//! ## Policies
//! - **CacheBox**: unbounded, keeps every result until invalidated
//! - **LruCacheBox**: bounded by entry count, evicts the oldest-inserted
//!   entry on overflow (a hit does not refresh an entry's position)
//!
//! ## Keys
//! - [`generic_key`]: every positional and keyword argument (default)
//! - [`single_arg_key`]: the first positional argument only
//! - any `Fn(&A) -> K` with `K: Hash + Eq`
//!
//! ```
//! use memocache::{CacheBox, LruCacheBox};
//!
//! let mut square = CacheBox::new(|x: u64| x * x);
//! assert_eq!(square.invoke(12), 144);
//! assert!(square.is_cached(&12));
//!
//! let mut ident = LruCacheBox::with_max_size(|x: u32| x, 10).unwrap();
//! for i in 0..50 {
//!     ident.invoke(i);
//! }
//! assert_eq!(ident.current_size(), 10);
//! ```
//!
//! Caches are single-threaded; wrap one in [`SharedCache`] to call it from
//! several threads.

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod key;
mod lru;
mod memoize;
mod shared;
mod stats;

pub use cache::CacheBox;
pub use config::{CacheConfig, DEFAULT_MAX_SIZE};
pub use error::{Error, Result};
pub use key::{generic_key, single_arg_key, CallArgs, FirstArg, KeyFn, Kwargs};
pub use lru::LruCacheBox;
pub use memoize::{cached_function, cached_function_with_key, Memoize, Memoized};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use memostore::OrderedStore;
