//! Stable binary min-heap.
//!
//! Entries are ordered by priority, and entries of equal priority come
//! out in the order they went in. On top of push/pop the heap supports
//! in-place priority updates, removal by value, O(n) bulk loading,
//! merging, and scoped snapshots that roll back every mutation made
//! inside them.

pub mod builder;
pub mod heap;
pub mod iter;
pub mod node;
pub mod priority;
pub mod snapshot;

#[cfg(test)]
mod validation;

pub use builder::{HeapBuilder, Item};
pub use heap::{KeyFn, MinHeap};
pub use iter::{DrainSorted, Iter};
pub use priority::Priority;
pub use snapshot::Snapshot;

/// Error types for heap operations.
///
/// An empty heap is not an error: `pop` and `peek` return `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HeapError {
    /// A raw value needed a derived priority but no key function is
    /// configured.
    #[error("{operation}: no key function configured to derive a priority")]
    MissingKey {
        /// The operation that needed the key.
        operation: &'static str,
    },
}

pub type HeapResult<T> = Result<T, HeapError>;
