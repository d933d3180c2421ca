//! Sequence codecs
//!
//! Three container codecs share one contract shape: [`ArrayCodec`]
//! (boxed slices, the reified fixed-once-built analogue of a native
//! array), [`ListCodec`] ([`Vec`]s), and [`SetCodec`] (insertion-ordered
//! [`IndexSet`]s). Each wraps an element codec and an inclusive
//! `[min, max]` length range, unbounded by default.
//!
//! An out-of-range length fails *before* any element is transcoded,
//! with the template `"<Kind> length '<n>' is out of range: <min>..<max>"`.
//! Per-element failures are collected exhaustively, indexed by position,
//! and reported as a single aggregate error rather than stopping at the
//! first bad element. Nested sequences recurse naturally, because the
//! element codec may itself be a sequence codec.

use std::fmt::{self, Display};
use std::hash::Hash;

use indexmap::IndexSet;

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult, Direction, SequenceKind};
use crate::provider::TypeProvider;

fn check_bounds(kind: SequenceKind, actual: usize, min: usize, max: usize) -> CodecResult<()> {
    if actual < min || actual > max {
        Err(CodecError::LengthOutOfRange {
            kind,
            actual,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

fn encode_elements<'a, C, P>(
    codec: &C,
    provider: &P,
    values: impl IntoIterator<Item = &'a C::Value>,
) -> CodecResult<Vec<P::Element>>
where
    C: Codec,
    C::Value: 'a,
    P: TypeProvider,
{
    let mut encoded = Vec::new();
    let mut errors = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match codec.encode_start(provider, provider.empty(), value) {
            Ok(element) => encoded.push(element),
            Err(err) => errors.push((index, err)),
        }
    }
    if errors.is_empty() {
        Ok(encoded)
    } else {
        Err(CodecError::InvalidElements {
            direction: Direction::Encode,
            errors,
        })
    }
}

fn decode_elements<C, P>(codec: &C, provider: &P, items: &[P::Element]) -> CodecResult<Vec<C::Value>>
where
    C: Codec,
    P: TypeProvider,
{
    let mut decoded = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match codec.decode_start(provider, item) {
            Ok(value) => decoded.push(value),
            Err(err) => errors.push((index, err)),
        }
    }
    if errors.is_empty() {
        Ok(decoded)
    } else {
        Err(CodecError::InvalidElements {
            direction: Direction::Decode,
            errors,
        })
    }
}

macro_rules! sequence_codec {
    ($(#[$docs:meta])* $codec:ident, $label:literal) => {
        $(#[$docs])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        pub struct $codec<C: Codec> {
            element: C,
            min: usize,
            max: usize,
        }

        impl<C: Codec> $codec<C> {
            /// Wraps `element` with no length restriction.
            pub fn new(element: C) -> Self {
                Self {
                    element,
                    min: 0,
                    max: usize::MAX,
                }
            }

            /// Wraps `element`, restricting lengths to the inclusive
            /// range `min..=max`.
            ///
            /// # Panics
            ///
            /// Panics if `min > max`; inverted bounds are a programming
            /// error at the call site.
            pub fn bounded(element: C, min: usize, max: usize) -> Self {
                assert!(
                    min <= max,
                    concat!(stringify!($codec), " bounds are inverted: {}..{}"),
                    min,
                    max
                );
                Self { element, min, max }
            }

            /// The wrapped element codec.
            pub fn element_codec(&self) -> &C {
                &self.element
            }
        }

        impl<C: Codec> Display for $codec<C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "[{}]"), self.element.codec_name())
            }
        }
    };
}

sequence_codec! {
    /// Codec for boxed slices with an optional inclusive length range.
    ArrayCodec, "ArrayCodec"
}
sequence_codec! {
    /// Codec for vectors with an optional inclusive length range.
    ListCodec, "ListCodec"
}
sequence_codec! {
    /// Codec for insertion-ordered sets with an optional inclusive
    /// length range.
    SetCodec, "SetCodec"
}

impl<C: Codec> Codec for ArrayCodec<C> {
    type Value = Box<[C::Value]>;

    fn codec_name(&self) -> String {
        format!("ArrayCodec[{}]", self.element.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        check_bounds(SequenceKind::Array, value.len(), self.min, self.max)?;
        let items = encode_elements(&self.element, provider, value.iter())?;
        let list = provider.create_list(items)?;
        Ok(provider.merge(current, list)?)
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        if provider.is_null(element) {
            return Err(CodecError::DecodeNull {
                type_name: self.codec_name(),
            });
        }
        let items = provider.get_list(element)?;
        check_bounds(SequenceKind::Array, items.len(), self.min, self.max)?;
        Ok(decode_elements(&self.element, provider, &items)?.into_boxed_slice())
    }
}

impl<C: Codec> Codec for ListCodec<C> {
    type Value = Vec<C::Value>;

    fn codec_name(&self) -> String {
        format!("ListCodec[{}]", self.element.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        check_bounds(SequenceKind::List, value.len(), self.min, self.max)?;
        let items = encode_elements(&self.element, provider, value.iter())?;
        let list = provider.create_list(items)?;
        Ok(provider.merge(current, list)?)
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        if provider.is_null(element) {
            return Err(CodecError::DecodeNull {
                type_name: self.codec_name(),
            });
        }
        let items = provider.get_list(element)?;
        check_bounds(SequenceKind::List, items.len(), self.min, self.max)?;
        decode_elements(&self.element, provider, &items)
    }
}

impl<C: Codec> Codec for SetCodec<C>
where
    C::Value: Hash + Eq,
{
    type Value = IndexSet<C::Value>;

    fn codec_name(&self) -> String {
        format!("SetCodec[{}]", self.element.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        check_bounds(SequenceKind::Set, value.len(), self.min, self.max)?;
        let items = encode_elements(&self.element, provider, value.iter())?;
        let list = provider.create_list(items)?;
        Ok(provider.merge(current, list)?)
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        if provider.is_null(element) {
            return Err(CodecError::DecodeNull {
                type_name: self.codec_name(),
            });
        }
        let items = provider.get_list(element)?;
        check_bounds(SequenceKind::Set, items.len(), self.min, self.max)?;
        // Duplicate elements collapse; the bounds apply to the wire
        // length, not the deduplicated size.
        Ok(decode_elements(&self.element, provider, &items)?
            .into_iter()
            .collect())
    }
}
