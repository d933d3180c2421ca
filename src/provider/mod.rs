//! Generic tree-model abstraction
//!
//! This module defines the [`TypeProvider`] trait, the single boundary
//! between the codec framework and any concrete wire format. A provider
//! owns one associated tree-element type and knows how to build, inspect,
//! and merge elements of that type; a [`Codec`](crate::codec::Codec)
//! composed against the trait works unchanged for every implementation.
//!
//! Providers are plain immutable values passed explicitly to every encode
//! and decode call. They hold no resources and no per-call state, so a
//! single provider value may be constructed once and shared freely,
//! including across threads.
//!
//! # The element model
//!
//! Every provider must support round-tripping the eight primitive kinds
//! the framework defines (boolean, byte, short, integer, long, float,
//! double, string) and the two container kinds (ordered list, ordered
//! string-keyed map), plus two sentinels:
//!
//! - an **empty** element, used as the seed for merge-based encoding, and
//! - a **null** element, representing an explicit absent value.
//!
//! The two sentinels may coincide for formats without a native null; the
//! [`is_null`](TypeProvider::is_null) and
//! [`get_empty`](TypeProvider::get_empty) methods make the distinction an
//! explicit part of the contract rather than a representation detail.
//!
//! # Merge semantics
//!
//! [`merge`](TypeProvider::merge) combines two elements and is the
//! backbone of product-type encoding, where several field codecs write
//! into the same container:
//!
//! - merging with an empty or null sentinel returns the other side;
//! - two lists concatenate, preserving order;
//! - two maps union, with `from` overriding `into` on key conflicts;
//! - any other pairing is a [`MergeConflict`] error.
//!
//! [`MergeConflict`]: crate::error::ProviderError::MergeConflict

pub mod plain;

use std::fmt::Debug;

use indexmap::IndexMap;

use crate::error::ProvideResult;

pub use plain::{PlainProvider, Value};

/// Abstraction over the tree model of one wire format.
///
/// All extraction methods must distinguish three failure conditions:
/// an element of the wrong kind ([`WrongType`]), an explicit null element
/// ([`NullValue`]), and a missing map entry ([`Missing`]). Construction
/// methods fail only when the provider cannot represent the requested
/// value at all.
///
/// Implementations must be referentially safe to call concurrently from
/// independent encode or decode operations, as long as each operation
/// works on its own element graph.
///
/// [`WrongType`]: crate::error::ProviderError::WrongType
/// [`NullValue`]: crate::error::ProviderError::NullValue
/// [`Missing`]: crate::error::ProviderError::Missing
pub trait TypeProvider {
    /// The format-specific tree element this provider constructs and
    /// consumes. Structural equality is part of the contract.
    type Element: Clone + PartialEq + Debug;

    /// Returns a fresh, empty element, used as a merge seed.
    fn empty(&self) -> Self::Element;

    /// Wraps a boolean as a tree element.
    fn create_boolean(&self, value: bool) -> ProvideResult<Self::Element>;

    /// Wraps a byte as a tree element.
    fn create_byte(&self, value: i8) -> ProvideResult<Self::Element>;

    /// Wraps a short as a tree element.
    fn create_short(&self, value: i16) -> ProvideResult<Self::Element>;

    /// Wraps an integer as a tree element.
    fn create_integer(&self, value: i32) -> ProvideResult<Self::Element>;

    /// Wraps a long as a tree element.
    fn create_long(&self, value: i64) -> ProvideResult<Self::Element>;

    /// Wraps a float as a tree element.
    fn create_float(&self, value: f32) -> ProvideResult<Self::Element>;

    /// Wraps a double as a tree element.
    fn create_double(&self, value: f64) -> ProvideResult<Self::Element>;

    /// Wraps a string as a tree element.
    fn create_string(&self, value: &str) -> ProvideResult<Self::Element>;

    /// Creates an explicit null element.
    ///
    /// Fails for providers whose format has no representation of null.
    fn create_null(&self) -> ProvideResult<Self::Element>;

    /// Builds an ordered list element from already-constructed elements.
    fn create_list(&self, items: Vec<Self::Element>) -> ProvideResult<Self::Element>;

    /// Builds a fresh, empty map element.
    fn create_map(&self) -> ProvideResult<Self::Element>;

    /// Builds a map element from already-constructed entries, preserving
    /// their order.
    fn create_map_from(
        &self,
        entries: IndexMap<String, Self::Element>,
    ) -> ProvideResult<Self::Element>;

    /// Extracts a boolean from an element.
    fn get_boolean(&self, element: &Self::Element) -> ProvideResult<bool>;

    /// Extracts a byte from an element.
    fn get_byte(&self, element: &Self::Element) -> ProvideResult<i8>;

    /// Extracts a short from an element, widening a byte if necessary.
    fn get_short(&self, element: &Self::Element) -> ProvideResult<i16>;

    /// Extracts an integer from an element, widening smaller integer
    /// kinds if necessary.
    fn get_integer(&self, element: &Self::Element) -> ProvideResult<i32>;

    /// Extracts a long from an element, widening smaller integer kinds
    /// if necessary.
    fn get_long(&self, element: &Self::Element) -> ProvideResult<i64>;

    /// Extracts a float from an element.
    fn get_float(&self, element: &Self::Element) -> ProvideResult<f32>;

    /// Extracts a double from an element, widening a float if necessary.
    fn get_double(&self, element: &Self::Element) -> ProvideResult<f64>;

    /// Extracts a string from an element.
    fn get_string(&self, element: &Self::Element) -> ProvideResult<String>;

    /// Extracts the items of a list element.
    fn get_list(&self, element: &Self::Element) -> ProvideResult<Vec<Self::Element>>;

    /// Extracts the entries of a map element, in order.
    fn get_map(
        &self,
        element: &Self::Element,
    ) -> ProvideResult<IndexMap<String, Self::Element>>;

    /// Reports whether a map-shaped element contains `key`.
    fn has(&self, container: &Self::Element, key: &str) -> ProvideResult<bool>;

    /// Returns the element stored under `key` in a map-shaped element.
    fn get(&self, container: &Self::Element, key: &str) -> ProvideResult<Self::Element>;

    /// Stores `value` under `key` in a map-shaped element, returning the
    /// updated container. Storing an explicit null element succeeds; it
    /// represents a present-but-null field.
    fn set(
        &self,
        container: Self::Element,
        key: &str,
        value: Self::Element,
    ) -> ProvideResult<Self::Element>;

    /// Combines two elements according to the module-level merge rules.
    fn merge(&self, into: Self::Element, from: Self::Element) -> ProvideResult<Self::Element>;

    /// Reports whether an element is the provider's null sentinel.
    fn is_null(&self, element: &Self::Element) -> bool;

    /// Normalizes an empty-or-null element to the canonical empty
    /// sentinel, failing on any element that carries actual content.
    fn get_empty(&self, element: &Self::Element) -> ProvideResult<Self::Element>;
}
