//! Heap construction and configuration.
//!
//! The only setting a heap carries is its key function, which derives a
//! priority from a value whenever one is pushed without an explicit
//! priority. [`HeapBuilder`] also takes a capacity hint and an optional
//! initial batch of items.

use std::fmt;
use std::sync::Arc;

use crate::heap::{KeyFn, MinHeap};
use crate::priority::Priority;
use crate::{HeapError, HeapResult};

/// An initial item for [`HeapBuilder::build_from`].
#[derive(Debug, Clone, PartialEq)]
pub enum Item<T, P> {
    /// A raw value; its priority comes from the key function.
    Value(T),
    /// A value with an explicit priority.
    Prioritized(P, T),
}

impl<T, P> From<(P, T)> for Item<T, P> {
    fn from((priority, value): (P, T)) -> Self {
        Item::Prioritized(priority, value)
    }
}

/// Builder for [`MinHeap`].
///
/// ```
/// use sheap::{Item, MinHeap};
///
/// let heap = MinHeap::builder()
///     .key(|name: &&str| name.len() as i64)
///     .capacity(8)
///     .build_from([Item::Value("three"), Item::Prioritized(0, "zero")])
///     .unwrap();
/// assert_eq!(heap.peek(), Some((0, &"zero")));
/// ```
pub struct HeapBuilder<T, P = i64> {
    key: Option<KeyFn<T, P>>,
    capacity: usize,
}

impl<T, P: Priority> MinHeap<T, P> {
    /// Start configuring a heap.
    pub fn builder() -> HeapBuilder<T, P> {
        HeapBuilder::new()
    }

    /// Build a heap from `items`, deriving priorities for raw values with
    /// `key`. Fails with [`HeapError::MissingKey`] if a raw value is given
    /// and `key` is `None`.
    pub fn try_from_items<I, F>(items: I, key: Option<F>) -> HeapResult<Self>
    where
        I: IntoIterator<Item = Item<T, P>>,
        F: Fn(&T) -> P + Send + Sync + 'static,
    {
        let mut builder = HeapBuilder::new();
        if let Some(key) = key {
            builder = builder.key(key);
        }
        builder.build_from(items)
    }
}

impl<T, P: Priority> HeapBuilder<T, P> {
    pub fn new() -> Self {
        HeapBuilder {
            key: None,
            capacity: 0,
        }
    }

    /// Derive priorities of raw values with `key`.
    pub fn key<F>(mut self, key: F) -> Self
    where
        F: Fn(&T) -> P + Send + Sync + 'static,
    {
        self.key = Some(Arc::new(key));
        self
    }

    /// Preallocate room for `capacity` entries.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// An empty heap with this configuration.
    pub fn build(self) -> MinHeap<T, P> {
        MinHeap::from_parts(self.key, self.capacity)
    }

    /// A heap holding `items`, each inserted with a regular push.
    ///
    /// All items are checked before any is inserted: a raw value without
    /// a key function fails the whole build.
    pub fn build_from<I>(self, items: I) -> HeapResult<MinHeap<T, P>>
    where
        I: IntoIterator<Item = Item<T, P>>,
    {
        let items: Vec<Item<T, P>> = items.into_iter().collect();
        let key = self.key;
        let has_raw = items.iter().any(|item| matches!(item, Item::Value(_)));
        if has_raw && key.is_none() {
            tracing::debug!(items = items.len(), "raw value without a key function");
            return Err(HeapError::MissingKey {
                operation: "build_from",
            });
        }

        let mut heap = MinHeap::from_parts(key, self.capacity.max(items.len()));
        for item in items {
            match item {
                Item::Value(value) => heap.push(value)?,
                Item::Prioritized(priority, value) => heap.push_with_priority(value, priority),
            }
        }
        tracing::debug!(len = heap.len(), "built heap");
        Ok(heap)
    }
}

impl<P: Priority> HeapBuilder<P, P> {
    /// A builder whose raw values are their own priority.
    pub fn natural() -> Self {
        Self::new().key(|value: &P| *value)
    }
}

impl<T, P: Priority> Default for HeapBuilder<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for HeapBuilder<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBuilder")
            .field("has_key", &self.key.is_some())
            .field("capacity", &self.capacity)
            .finish()
    }
}
