//! Scoped snapshots.
//!
//! Taking a snapshot copies the heap storage and key function into a
//! [`Snapshot`] guard. The guard derefs to the heap, so any operation can
//! run inside the scope. When the guard drops, on normal exit, early
//! return or panic unwind, the copy is put back in place of the live
//! state. There is no commit: every mutation made inside the scope is
//! undone, including replacing the heap value wholesale.
//!
//! Scopes nest. Each guard borrows the heap (or the enclosing guard)
//! mutably, so inner scopes always end before outer ones and the saved
//! copies unwind in LIFO order through the borrow chain.
//!
//! The sequence counter is never rewound below its value when the scope
//! opened; stamps of the restored entries stay unique.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::heap::{KeyFn, MinHeap};
use crate::node::Node;
use crate::priority::Priority;

/// Rollback guard returned by [`MinHeap::snapshot`].
#[must_use = "the snapshot rolls back as soon as the guard is dropped"]
pub struct Snapshot<'a, T, P: Priority> {
    heap: &'a mut MinHeap<T, P>,
    saved: Vec<Node<T, P>>,
    saved_key: Option<KeyFn<T, P>>,
    saved_sequence: u64,
    depth: usize,
}

impl<T: Clone, P: Priority> MinHeap<T, P> {
    /// Open a snapshot scope. O(n) time and space for the copy.
    pub fn snapshot(&mut self) -> Snapshot<'_, T, P> {
        let saved = self.nodes.clone();
        let saved_key = self.key.clone();
        let saved_sequence = self.next_sequence;
        self.open_snapshots += 1;
        let depth = self.open_snapshots;
        tracing::trace!(depth, len = saved.len(), "snapshot taken");
        Snapshot {
            heap: self,
            saved,
            saved_key,
            saved_sequence,
            depth,
        }
    }

    /// Run `f` against the heap inside a snapshot scope and return its
    /// result. The heap is rolled back afterwards, including when `f`
    /// panics.
    pub fn with_snapshot<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut MinHeap<T, P>) -> R,
    {
        let mut scope = self.snapshot();
        f(&mut *scope)
    }

    /// Up to `k` smallest values in ascending order.
    ///
    /// Pops inside a snapshot scope, so the heap is unchanged afterwards.
    /// Uses O(n) extra space for the snapshot copy regardless of `k`.
    pub fn k_smallest(&mut self, k: usize) -> Vec<T> {
        let mut scope = self.snapshot();
        let count = k.min(scope.len());
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            match scope.pop() {
                Some(value) => out.push(value),
                None => break,
            }
        }
        out
    }
}

impl<T, P: Priority> MinHeap<T, P> {
    /// Number of snapshot scopes currently open on this heap.
    pub fn snapshot_depth(&self) -> usize {
        self.open_snapshots
    }
}

impl<T, P: Priority> Deref for Snapshot<'_, T, P> {
    type Target = MinHeap<T, P>;

    fn deref(&self) -> &MinHeap<T, P> {
        self.heap
    }
}

impl<T, P: Priority> DerefMut for Snapshot<'_, T, P> {
    fn deref_mut(&mut self) -> &mut MinHeap<T, P> {
        self.heap
    }
}

impl<T, P: Priority> Drop for Snapshot<'_, T, P> {
    fn drop(&mut self) {
        let heap = &mut *self.heap;
        heap.nodes = mem::take(&mut self.saved);
        heap.key = self.saved_key.take();
        heap.next_sequence = heap.next_sequence.max(self.saved_sequence);
        heap.open_snapshots = self.depth - 1;
        tracing::trace!(
            depth = heap.open_snapshots,
            len = heap.nodes.len(),
            "snapshot rolled back"
        );
    }
}

impl<T: fmt::Debug, P: Priority> fmt::Debug for Snapshot<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("depth", &self.depth)
            .field("saved_len", &self.saved.len())
            .field("heap", &self.heap)
            .finish()
    }
}
