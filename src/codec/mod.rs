//! Core of the transcoding API
//!
//! This module contains the definitions of the high-level transcoding
//! traits [`Codec`] and [`KeyableCodec`], which together form the keystone
//! of this library. A `Codec` describes both directions of a conversion
//! between one native value type and the generic tree model of an
//! arbitrary [`TypeProvider`]; any upstream code that does not use
//! `Codec` at least indirectly derives little benefit from this library.
//!
//! Codecs are immutable value objects: every derived combinator
//! ([`list`](Codec::list), [`optional`](Codec::optional),
//! [`min_length`](Codec::min_length), ...) consumes its receiver and
//! returns a *new* codec, leaving composition free of shared state. A
//! single encode or decode invocation is a pure function of its
//! arguments and may run concurrently with any other invocation, as long
//! as each call operates on its own tree-element graph.
//!
//! The submodules define the structural codecs that compose inner codecs
//! into larger shapes: sequences ([`seq`]), maps ([`map`]), optionals
//! ([`opt`]), alternatives ([`either`], [`alt`]), constants ([`unit`]),
//! iterator streams ([`stream`]), and enumerations ([`enums`]). The
//! primitive leaf codecs live in [`prim`].
//!
//! [`TypeProvider`]: crate::provider::TypeProvider

pub mod alt;
pub mod either;
pub mod enums;
pub mod map;
pub mod opt;
pub mod prim;
pub mod seq;
pub mod stream;
pub mod unit;

use std::hash::Hash;

use crate::builder::ConfiguredCodec;
use crate::constrain::{Constrained, Decimal, Integral, Length, Numeric};
use crate::error::CodecResult;
use crate::provider::TypeProvider;

use self::alt::AlternativeCodec;
use self::opt::{NullableCodec, OptionalCodec};
use self::seq::{ArrayCodec, ListCodec, SetCodec};
use self::stream::StreamCodec;

/// A paired encode/decode strategy for one value type, independent of
/// wire format.
///
/// # Contract
///
/// - [`encode_start`](Codec::encode_start) merges the encoded form of a
///   value into a pre-existing (possibly empty) tree element and returns
///   the updated element.
/// - [`decode_start`](Codec::decode_start) is the inverse. A null
///   element decodes to a [`DecodeNull`] error unless the codec is
///   null-tolerant; a structurally wrong element decodes to an error
///   describing the expected versus actual shape.
/// - [`codec_name`](Codec::codec_name) is part of the observable
///   contract: it is the name interpolated into every error template,
///   and concrete codec types implement `Display` as exactly this name.
///
/// Recoverable data problems are always surfaced as `Err`; only genuine
/// programming errors (inverted bounds passed to a combinator, a unit
/// supplier panicking) abort.
///
/// [`DecodeNull`]: crate::error::CodecError::DecodeNull
pub trait Codec {
    /// The native value type this codec transcodes.
    type Value;

    /// The display name of this codec, interpolated into error messages.
    fn codec_name(&self) -> String;

    /// Encodes `value` against `provider`, merging the result into
    /// `current` and returning the updated tree element.
    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element>;

    /// Decodes a value of type [`Value`](Codec::Value) from `element`.
    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value>;

    /// Whether this codec tolerates a wholly absent input, decoding it
    /// to a meaningful value instead of failing.
    ///
    /// Grouped product-type codecs consult this to decide whether a
    /// missing field is an error or decodes against a null element.
    /// Optional, nullable, and unit codecs override this to `true`.
    fn absence_tolerant(&self) -> bool {
        false
    }

    /// Derives a codec for unbounded [`Vec`]s of this codec's value.
    fn list(self) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec::new(self)
    }

    /// Derives a codec for [`Vec`]s whose length must fall in the
    /// inclusive range `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    fn list_within(self, min: usize, max: usize) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec::bounded(self, min, max)
    }

    /// Derives a codec for [`Vec`]s with at least one element.
    fn non_empty_list(self) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec::bounded(self, 1, usize::MAX)
    }

    /// Derives a codec for boxed slices of this codec's value.
    fn array(self) -> ArrayCodec<Self>
    where
        Self: Sized,
    {
        ArrayCodec::new(self)
    }

    /// Derives a codec for boxed slices whose length must fall in the
    /// inclusive range `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    fn array_within(self, min: usize, max: usize) -> ArrayCodec<Self>
    where
        Self: Sized,
    {
        ArrayCodec::bounded(self, min, max)
    }

    /// Derives a codec for insertion-ordered sets of this codec's value.
    fn set(self) -> SetCodec<Self>
    where
        Self: Sized,
        Self::Value: Hash + Eq,
    {
        SetCodec::new(self)
    }

    /// Derives a codec for `Option`s of this codec's value. Absence
    /// (missing field or provider null) decodes to `None`; `None`
    /// encodes as nothing.
    fn optional(self) -> OptionalCodec<Self>
    where
        Self: Sized,
    {
        OptionalCodec::new(self)
    }

    /// Like [`optional`](Codec::optional), but encoding `None`
    /// substitutes `default` instead of writing nothing.
    fn optional_or(self, default: Self::Value) -> OptionalCodec<Self>
    where
        Self: Sized,
        Self::Value: Clone + Send + Sync + 'static,
    {
        OptionalCodec::with_default(self, default)
    }

    /// Like [`optional`](Codec::optional), but encoding `None` invokes
    /// `supplier` for a substitute value.
    fn optional_or_else<F>(self, supplier: F) -> OptionalCodec<Self>
    where
        Self: Sized,
        F: Fn() -> Self::Value + Send + Sync + 'static,
    {
        OptionalCodec::with_supplier(self, supplier)
    }

    /// Derives a codec for `Option`s that writes an *explicit* null
    /// element for `None`, rather than omitting the value.
    fn nullable(self) -> NullableCodec<Self>
    where
        Self: Sized,
    {
        NullableCodec::new(self)
    }

    /// Derives a codec transcoding owned iterators of this codec's
    /// value through a list element.
    fn stream(self) -> StreamCodec<Self>
    where
        Self: Sized,
        Self::Value: Clone,
    {
        StreamCodec::new(self)
    }

    /// Combines this codec with a fallback tried when decoding fails.
    /// Encoding always goes through `self`.
    fn or_else<A>(self, secondary: A) -> AlternativeCodec<Self, A>
    where
        Self: Sized,
        A: Codec<Value = Self::Value>,
    {
        AlternativeCodec::new(self, secondary)
    }

    /// Wraps this codec in an empty constraint set, ready for
    /// constraint attachment.
    fn constrain(self) -> Constrained<Self>
    where
        Self: Sized,
    {
        Constrained::new(self)
    }

    /// Restricts values to the inclusive range `min..=max`.
    fn ranged(self, min: Self::Value, max: Self::Value) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Numeric + Send + Sync + 'static,
    {
        Constrained::new(self).between_or_equal(min, max)
    }

    /// Requires a length of at least `min`.
    fn min_length(self, min: usize) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Length + 'static,
    {
        Constrained::new(self).min_length(min)
    }

    /// Requires a length of at most `max`.
    fn max_length(self, max: usize) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Length + 'static,
    {
        Constrained::new(self).max_length(max)
    }

    /// Requires a length of exactly `n`, atomically setting both the
    /// minimum-length and maximum-length categories.
    fn exact_length(self, n: usize) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Length + 'static,
    {
        Constrained::new(self).exact_length(n)
    }

    /// Requires a length within the inclusive range `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    fn length_between(self, min: usize, max: usize) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Length + 'static,
    {
        Constrained::new(self).length_between(min, max)
    }

    /// Requires an empty value.
    fn empty(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Length + 'static,
    {
        Constrained::new(self).empty()
    }

    /// Requires a non-empty value.
    fn not_empty(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Length + 'static,
    {
        Constrained::new(self).not_empty()
    }

    /// Requires a strictly positive value.
    fn positive(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Numeric + Send + Sync + 'static,
    {
        Constrained::new(self).positive()
    }

    /// Requires a strictly negative value.
    fn negative(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Numeric + Send + Sync + 'static,
    {
        Constrained::new(self).negative()
    }

    /// Requires a value of at least zero.
    fn non_negative(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Numeric + Send + Sync + 'static,
    {
        Constrained::new(self).non_negative()
    }

    /// Requires a value strictly between `min` and `max` (exclusive).
    fn between(self, min: Self::Value, max: Self::Value) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Numeric + Send + Sync + 'static,
    {
        Constrained::new(self).between(min, max)
    }

    /// Requires a value within the inclusive range `min..=max`.
    fn between_or_equal(self, min: Self::Value, max: Self::Value) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Numeric + Send + Sync + 'static,
    {
        Constrained::new(self).between_or_equal(min, max)
    }

    /// Requires an even value.
    fn even(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Integral + Send + Sync + 'static,
    {
        Constrained::new(self).even()
    }

    /// Requires an odd value.
    fn odd(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Integral + Send + Sync + 'static,
    {
        Constrained::new(self).odd()
    }

    /// Requires a value divisible by `divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    fn divisible_by(self, divisor: Self::Value) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Integral + Send + Sync + 'static,
    {
        Constrained::new(self).divisible_by(divisor)
    }

    /// Requires a (positive) power of two.
    fn power_of_two(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Integral + Send + Sync + 'static,
    {
        Constrained::new(self).power_of_two()
    }

    /// Requires exactly `digits` decimal digits after the point,
    /// atomically setting both scale categories.
    fn scale(self, digits: u32) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Decimal + Send + Sync + 'static,
    {
        Constrained::new(self).scale(digits)
    }

    /// Requires at least `digits` decimal digits after the point.
    fn min_scale(self, digits: u32) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Decimal + Send + Sync + 'static,
    {
        Constrained::new(self).min_scale(digits)
    }

    /// Requires at most `digits` decimal digits after the point.
    fn max_scale(self, digits: u32) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Decimal + Send + Sync + 'static,
    {
        Constrained::new(self).max_scale(digits)
    }

    /// Requires at most `digits` significant digits in total.
    fn precision(self, digits: u32) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Decimal + Send + Sync + 'static,
    {
        Constrained::new(self).precision(digits)
    }

    /// Requires a value with no fractional part.
    fn integral(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Decimal + Send + Sync + 'static,
    {
        Constrained::new(self).integral()
    }

    /// Requires a value in the normalized range `0.0..=1.0`.
    fn normalized(self) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: Decimal + Send + Sync + 'static,
    {
        Constrained::new(self).normalized()
    }

    /// Requires string values to match the regular expression `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression.
    fn formatted(self, pattern: &str) -> Constrained<Self>
    where
        Self: Sized,
        Self::Value: AsRef<str> + 'static,
    {
        Constrained::new(self).formatted(pattern)
    }

    /// Binds this codec to a named field of a product type `O`, for use
    /// with [`CodecBuilder`](crate::builder::CodecBuilder).
    fn configure<O>(
        self,
        name: &str,
        getter: fn(&O) -> &Self::Value,
    ) -> ConfiguredCodec<Self, O>
    where
        Self: Sized,
    {
        ConfiguredCodec::new(self, name, getter)
    }
}

/// A codec whose values can additionally serialize as map keys.
///
/// Map-shaped containers in every supported format are keyed by strings,
/// so key transcoding is a string conversion independent of the tree
/// element type. [`decode_key`](KeyableCodec::decode_key) on an
/// unparsable string yields
/// `"Unable to decode key '<key>' as <type-name>"`.
pub trait KeyableCodec: Codec {
    /// Encodes `value` as a map key.
    fn encode_key<P: TypeProvider>(
        &self,
        provider: &P,
        value: &Self::Value,
    ) -> CodecResult<String>;

    /// Decodes a map key back into a value.
    fn decode_key<P: TypeProvider>(&self, provider: &P, key: &str)
        -> CodecResult<Self::Value>;
}

#[cfg(test)]
mod tests {
    use super::prim::{IntegerCodec, StringCodec, INTEGER, STRING};
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn threadsafety() {
        dummy::<IntegerCodec>();
        dummy::<ListCodec<IntegerCodec>>();
        dummy::<ArrayCodec<StringCodec>>();
        dummy::<OptionalCodec<IntegerCodec>>();
        dummy::<NullableCodec<StringCodec>>();
        dummy::<Constrained<StringCodec>>();
        dummy::<AlternativeCodec<IntegerCodec, IntegerCodec>>();
        dummy::<StreamCodec<IntegerCodec>>();
    }

    #[test]
    fn composed_names_nest() {
        assert_eq!(INTEGER.list().codec_name(), "ListCodec[IntegerCodec]");
        assert_eq!(
            STRING.optional().list().codec_name(),
            "ListCodec[OptionalCodec[StringCodec]]"
        );
        assert_eq!(
            INTEGER.positive().codec_name(),
            "ConstrainedIntegerCodec"
        );
    }

    #[test]
    fn combinators_do_not_mutate_the_receiver() {
        // Primitive codecs are Copy; deriving from one twice yields two
        // independent, equal codecs.
        let bounded = INTEGER.list_within(1, 2);
        let unbounded = INTEGER.list();
        assert_ne!(bounded, INTEGER.list());
        assert_eq!(unbounded, INTEGER.list());
    }
}
