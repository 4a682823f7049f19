//! Generic doubling array.
//!
//! [`GrowableVec`] tracks its own capacity on top of a `Vec` so growth is
//! observable and fallible: capacity doubles (starting from 1) when a push
//! finds the array full, allocation failures surface as
//! [`Error::OutOfMemory`], and nothing ever shrinks the capacity.

use crate::error::{Error, Result};
use std::ops::Index;

/// Contiguous array with explicit doubling growth.
#[derive(Clone, Debug)]
pub struct GrowableVec<T> {
    items: Vec<T>,
    capacity: usize,
    limit: Option<usize>,
}

impl<T> GrowableVec<T> {
    /// Create an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_limit(capacity, None)
    }

    /// Create an empty array that refuses to grow past `limit` elements.
    pub fn with_limit(capacity: usize, limit: Option<usize>) -> Result<Self> {
        if limit.is_some_and(|max| capacity > max) {
            return Err(Error::OutOfMemory {
                requested: capacity,
            });
        }
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory {
                requested: capacity,
            })?;
        Ok(Self {
            items,
            capacity,
            limit,
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the array holds before it must grow.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an element, doubling the capacity first if the array is full.
    ///
    /// On failure the array is unchanged and `item` is dropped.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.capacity {
            self.grow()?;
        }
        self.items.push(item);
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        let requested = self
            .capacity
            .checked_mul(2)
            .ok_or(Error::OutOfMemory {
                requested: usize::MAX,
            })?
            .max(1);
        if self.limit.is_some_and(|max| requested > max) {
            tracing::debug!(
                capacity = self.capacity,
                requested,
                "array growth refused by limit"
            );
            return Err(Error::OutOfMemory { requested });
        }
        self.items
            .try_reserve_exact(requested - self.items.len())
            .map_err(|_| {
                tracing::debug!(requested, "array allocation failed");
                Error::OutOfMemory { requested }
            })?;
        self.capacity = requested;
        tracing::trace!(capacity = requested, "array grown");
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Put `item` at `index` and return the element it displaced.
    pub fn replace(&mut self, index: usize, item: T) -> Result<T> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    /// Get the element at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Get the element at `index` mutably.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Drop every element past `len`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate mutably over the elements in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// View the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> GrowableVec<T> {
    /// Index of the first element equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }
}

impl<T: PartialEq> PartialEq for GrowableVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for GrowableVec<T> {}

impl<T> Index<usize> for GrowableVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a GrowableVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
