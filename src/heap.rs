//! A stable min-heap priority queue.
//!
//! Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2.
//! Every mutation path (push, pop, bulk push, merge, priority update,
//! removal, snapshot rollback) leaves the storage satisfying
//! `nodes[parent(i)] <= nodes[i]` under the node order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::iter::Iter;
use crate::node::Node;
use crate::priority::Priority;
use crate::{HeapError, HeapResult};

/// Derives a priority from a value.
pub type KeyFn<T, P> = Arc<dyn Fn(&T) -> P + Send + Sync>;

/// A min-heap that pops the lowest-priority value first, and among equal
/// priorities the value pushed first.
///
/// Not synchronized: share it across threads only behind a lock.
pub struct MinHeap<T, P = i64> {
    pub(crate) nodes: Vec<Node<T, P>>,
    pub(crate) next_sequence: u64,
    pub(crate) key: Option<KeyFn<T, P>>,
    /// Open snapshot scopes. The saved copies live in the guards.
    pub(crate) open_snapshots: usize,
}

impl<T, P: Priority> MinHeap<T, P> {
    /// Create a new, empty heap with no key function.
    ///
    /// Values must be pushed with an explicit priority.
    pub fn new() -> Self {
        Self::from_parts(None, 0)
    }

    /// Create an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(None, capacity)
    }

    /// Create an empty heap whose `push` derives priorities with `key`.
    pub fn with_key<F>(key: F) -> Self
    where
        F: Fn(&T) -> P + Send + Sync + 'static,
    {
        Self::from_parts(Some(Arc::new(key)), 0)
    }

    pub(crate) fn from_parts(key: Option<KeyFn<T, P>>, capacity: usize) -> Self {
        MinHeap {
            nodes: Vec::with_capacity(capacity),
            next_sequence: 0,
            key,
            open_snapshots: 0,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if a key function is configured.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn key_for(&self, operation: &'static str) -> HeapResult<KeyFn<T, P>> {
        match &self.key {
            Some(key) => Ok(Arc::clone(key)),
            None => {
                tracing::debug!(operation, "no key function configured");
                Err(HeapError::MissingKey { operation })
            }
        }
    }

    /// Push a value, deriving its priority from the key function.
    ///
    /// Fails with [`HeapError::MissingKey`] if the heap has no key
    /// function. A heap of bare numbers is not keyed implicitly: build it
    /// with [`MinHeap::natural`] or [`HeapBuilder::natural`] so the value
    /// serves as its own priority.
    ///
    /// [`HeapBuilder::natural`]: crate::HeapBuilder::natural
    pub fn push(&mut self, value: T) -> HeapResult<()> {
        let key = self.key_for("push")?;
        let priority = key(&value);
        self.push_with_priority(value, priority);
        Ok(())
    }

    /// Push a value with an explicit priority. O(log n).
    pub fn push_with_priority(&mut self, value: T, priority: P) {
        let sequence = self.take_sequence();
        self.nodes.push(Node::new(priority, value, sequence));
        self.sift_up(self.nodes.len() - 1);
    }

    /// Pop the minimum value.
    ///
    /// Returns `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.pop_entry().map(|(_, value)| value)
    }

    /// Pop the minimum entry as `(priority, value)`.
    pub fn pop_entry(&mut self) -> Option<(P, T)> {
        if self.nodes.is_empty() {
            return None;
        }
        // Swap root with last, remove last, sift down root
        let last = self.nodes.len() - 1;
        self.nodes.swap(0, last);
        let node = self.nodes.pop()?;
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some((node.priority, node.value))
    }

    /// The minimum entry as `(priority, &value)`, without removing it.
    pub fn peek(&self) -> Option<(P, &T)> {
        self.nodes.first().map(|node| (node.priority, &node.value))
    }

    /// Append many values and restore the heap with one O(n) heapify
    /// pass instead of sifting each value in.
    ///
    /// Needs a key function; without one nothing is appended and
    /// [`HeapError::MissingKey`] is returned.
    pub fn bulk_push<I>(&mut self, values: I) -> HeapResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        let key = self.key_for("bulk_push")?;
        self.bulk_push_with_priority(values.into_iter().map(|value| (key(&value), value)));
        Ok(())
    }

    /// Bulk path for explicit `(priority, value)` pairs.
    pub fn bulk_push_with_priority<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (P, T)>,
    {
        let before = self.nodes.len();
        let entries = entries.into_iter();
        self.nodes.reserve(entries.size_hint().0);
        for (priority, value) in entries {
            let sequence = self.take_sequence();
            self.nodes.push(Node::new(priority, value, sequence));
        }
        let added = self.nodes.len() - before;
        if added > 0 {
            self.heapify();
        }
        tracing::debug!(added, len = self.nodes.len(), "bulk push");
    }

    /// Absorb every entry of `other`.
    ///
    /// Sequence numbers are kept as they were, so equal-priority entries
    /// from the two heaps interleave by their original stamps rather than
    /// by a global insertion order. Later pushes into `self` still order
    /// after all absorbed entries of equal priority. The key function of
    /// `other` is dropped.
    pub fn merge(&mut self, other: MinHeap<T, P>) {
        let absorbed = other.nodes.len();
        self.next_sequence = self.next_sequence.max(other.next_sequence);
        if absorbed == 0 {
            return;
        }
        self.nodes.extend(other.nodes);
        self.heapify();
        tracing::debug!(absorbed, len = self.nodes.len(), "merged heap");
    }

    /// Storage index of the first entry equal to `value`.
    fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.nodes.iter().position(|node| node.value == *value)
    }

    /// Returns true if some entry equals `value`. O(n).
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.position(value).is_some()
    }

    /// Priority of the first entry equal to `value`, in storage order.
    pub fn priority_of(&self, value: &T) -> Option<P>
    where
        T: PartialEq,
    {
        self.position(value).map(|i| self.nodes[i].priority)
    }

    /// Change the priority of the first entry equal to `value`.
    ///
    /// With duplicate values only the one at the lowest storage index is
    /// touched, which is not necessarily the one pushed first or the one
    /// with the smallest priority. Returns false if no entry matched.
    /// O(n) scan plus O(log n) repair.
    pub fn update_priority(&mut self, value: &T, new_priority: P) -> bool
    where
        T: PartialEq,
    {
        let Some(index) = self.position(value) else {
            return false;
        };
        let old = std::mem::replace(&mut self.nodes[index].priority, new_priority);
        if new_priority.cmp_priority(&old) == Ordering::Less {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
        true
    }

    /// Remove the first entry equal to `value`, in storage order.
    ///
    /// Returns false if no entry matched. O(n) scan plus O(log n) repair.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(index) = self.position(value) else {
            return false;
        };
        self.nodes.swap_remove(index);
        // The moved-in tail entry may belong below or above its new slot.
        if index < self.nodes.len() && self.sift_down(index) == index {
            self.sift_up(index);
        }
        true
    }

    /// Iterate over values in storage order, which is not sorted order.
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter::new(&self.nodes)
    }

    /// Consume the heap, returning values in storage order.
    pub fn into_vec(self) -> Vec<T> {
        self.nodes.into_iter().map(|node| node.value).collect()
    }

    /// Consume the heap, returning values in ascending priority order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.drain());
        sorted
    }

    /// Sift element at `index` up to maintain heap property.
    ///
    /// Returns the index the element ended at.
    pub(crate) fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[index].precedes(&self.nodes[parent]) {
                self.nodes.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Sift element at `index` down to maintain heap property.
    ///
    /// Returns the index the element ended at.
    pub(crate) fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.nodes.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.nodes[left].precedes(&self.nodes[smallest]) {
                smallest = left;
            }
            if right < len && self.nodes[right].precedes(&self.nodes[smallest]) {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.nodes.swap(index, smallest);
            index = smallest;
        }
        index
    }

    /// Bottom-up heapify: sift down every internal node, last first. O(n).
    pub(crate) fn heapify(&mut self) {
        for index in (0..self.nodes.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Checks the heap invariant over the whole storage.
    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.nodes.len()).all(|i| !self.nodes[i].precedes(&self.nodes[(i - 1) / 2]))
    }
}

impl<P: Priority> MinHeap<P, P> {
    /// A heap of bare priorities: each value is its own priority.
    pub fn natural() -> Self {
        Self::with_key(|value: &P| *value)
    }
}

// A clone starts outside every scope: the saved copies belong to the
// guards of the heap it was cloned from.
impl<T: Clone, P: Clone> Clone for MinHeap<T, P> {
    fn clone(&self) -> Self {
        MinHeap {
            nodes: self.nodes.clone(),
            next_sequence: self.next_sequence,
            key: self.key.clone(),
            open_snapshots: 0,
        }
    }
}

impl<T, P: Priority> Default for MinHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for MinHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap")
            .field("nodes", &self.nodes)
            .field("next_sequence", &self.next_sequence)
            .field("has_key", &self.key.is_some())
            .field("snapshot_depth", &self.open_snapshots)
            .finish()
    }
}

impl<T, P: Priority> Extend<(P, T)> for MinHeap<T, P> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        self.bulk_push_with_priority(iter);
    }
}

impl<T, P: Priority> FromIterator<(P, T)> for MinHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.bulk_push_with_priority(iter);
        heap
    }
}

impl<'a, T, P: Priority> IntoIterator for &'a MinHeap<T, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
