//! Iterators over a heap.
//!
//! [`Iter`] walks the storage as-is (heap order, not sorted).
//! [`DrainSorted`] pops until the heap is empty.

use std::iter::FusedIterator;
use std::slice;

use crate::heap::MinHeap;
use crate::node::Node;
use crate::priority::Priority;

/// Borrowing iterator over values in storage order.
///
/// Created by [`MinHeap::iter`]. The order is the heap's array layout;
/// only the first item is guaranteed to be the minimum.
#[derive(Debug, Clone)]
pub struct Iter<'a, T, P> {
    inner: slice::Iter<'a, Node<T, P>>,
}

impl<'a, T, P> Iter<'a, T, P> {
    pub(crate) fn new(nodes: &'a [Node<T, P>]) -> Self {
        Iter {
            inner: nodes.iter(),
        }
    }
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|node| &node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, P> ExactSizeIterator for Iter<'_, T, P> {}
impl<T, P> FusedIterator for Iter<'_, T, P> {}

/// Consuming iterator that yields values in ascending priority order.
///
/// Created by [`MinHeap::drain`]. Each `next` is a `pop`. Dropping the
/// iterator before it is exhausted discards the remaining entries, so
/// the heap is empty once the drain is gone.
#[derive(Debug)]
pub struct DrainSorted<'a, T, P: Priority> {
    heap: &'a mut MinHeap<T, P>,
}

impl<T, P: Priority> MinHeap<T, P> {
    /// Pop every entry, smallest first.
    pub fn drain(&mut self) -> DrainSorted<'_, T, P> {
        DrainSorted { heap: self }
    }
}

impl<T, P: Priority> Iterator for DrainSorted<'_, T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, P: Priority> ExactSizeIterator for DrainSorted<'_, T, P> {}
impl<T, P: Priority> FusedIterator for DrainSorted<'_, T, P> {}

impl<T, P: Priority> Drop for DrainSorted<'_, T, P> {
    fn drop(&mut self) {
        self.heap.nodes.clear();
    }
}
