//! # memostore
//!
//! Keyed store that remembers the order in which keys were first inserted.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to slot (O(1) lookups)
//! - **Order list**: Doubly-linked list threaded through a slot arena, so
//!   removing an arbitrary key or either end is O(1)
//!
//! Overwriting an existing key replaces its value in place; its position in
//! the order list does not move.

#![warn(missing_docs)]

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{Iter, OrderedStore};
