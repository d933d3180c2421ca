//! Length abstraction for constrainable values
//!
//! The length-family constraints (`min_length`, `exact_length`, `empty`,
//! ...) apply to any value with a meaningful element count. [`Length`]
//! is the small trait that unifies strings, vectors, boxed slices, and
//! the ordered set/map containers under that notion.

use indexmap::{IndexMap, IndexSet};

/// A value with a measurable length, in elements (characters for
/// strings).
pub trait Length {
    /// The number of elements in this value.
    fn length(&self) -> usize;
}

impl Length for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for Box<[T]> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for IndexSet<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Length for IndexMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}
