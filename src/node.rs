//! Heap entries and their ordering.

use std::cmp::Ordering;

use crate::priority::Priority;

/// One entry of the heap.
///
/// Ordered by `priority` first and by `sequence` second, so among equal
/// priorities the entry inserted first is the smaller one (FIFO).
#[derive(Debug, Clone)]
pub(crate) struct Node<T, P> {
    pub priority: P,
    pub value: T,
    /// Insertion stamp handed out by the owning heap. Never reused.
    pub sequence: u64,
}

impl<T, P: Priority> Node<T, P> {
    pub fn new(priority: P, value: T, sequence: u64) -> Self {
        Node {
            priority,
            value,
            sequence,
        }
    }

    /// Two-key total order: priority ascending, then sequence ascending.
    #[inline]
    pub fn order(&self, other: &Self) -> Ordering {
        self.priority
            .cmp_priority(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }

    /// True if `self` must sit above `other` in the heap.
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool {
        self.order(other) == Ordering::Less
    }
}
