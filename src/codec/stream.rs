//! Iterator-valued codec
//!
//! [`StreamCodec`] transcodes owned iterators through a list element.
//! Encoding drains a clone of the iterator into a list; decoding reads
//! a list and hands back an iterator over its decoded elements. The
//! value type is the concrete [`std::vec::IntoIter`], so a decoded
//! stream is consumed lazily by the caller while the element itself can
//! be dropped.

use std::fmt::{self, Display};

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult, Direction};
use crate::provider::TypeProvider;

/// Codec for owned iterators of an inner codec's value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StreamCodec<C: Codec> {
    element: C,
}

impl<C: Codec> StreamCodec<C>
where
    C::Value: Clone,
{
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Codec> Codec for StreamCodec<C>
where
    C::Value: Clone,
{
    type Value = std::vec::IntoIter<C::Value>;

    fn codec_name(&self) -> String {
        format!("StreamCodec[{}]", self.element.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        let mut items = Vec::new();
        let mut errors = Vec::new();
        for (index, item) in value.clone().enumerate() {
            match self.element.encode_start(provider, provider.empty(), &item) {
                Ok(encoded) => items.push(encoded),
                Err(err) => errors.push((index, err)),
            }
        }
        if !errors.is_empty() {
            return Err(CodecError::InvalidElements {
                direction: Direction::Encode,
                errors,
            });
        }
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
        let mut decoded = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.element.decode_start(provider, item) {
                Ok(value) => decoded.push(value),
                Err(err) => errors.push((index, err)),
            }
        }
        if !errors.is_empty() {
            return Err(CodecError::InvalidElements {
                direction: Direction::Decode,
                errors,
            });
        }
        Ok(decoded.into_iter())
    }
}

impl<C: Codec> Display for StreamCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamCodec[{}]", self.element.codec_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::prim::INTEGER;
    use crate::provider::{PlainProvider, Value};

    #[test]
    fn round_trips_through_a_list_element() {
        let p = PlainProvider;
        let codec = INTEGER.stream();
        let value = vec![1, 2, 3].into_iter();
        let element = codec.encode_start(&p, p.empty(), &value).unwrap();
        assert_eq!(
            element,
            Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );
        let decoded: Vec<i32> = codec.decode_start(&p, &element).unwrap().collect();
        assert_eq!(decoded, vec![1, 2, 3]);
    }

    #[test]
    fn encoding_leaves_the_source_iterator_intact() {
        let p = PlainProvider;
        let codec = INTEGER.stream();
        let value = vec![4, 5].into_iter();
        let _ = codec.encode_start(&p, p.empty(), &value).unwrap();
        assert_eq!(value.collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn decoded_stream_is_lazily_consumable() {
        let p = PlainProvider;
        let codec = INTEGER.stream();
        let element = Value::List(vec![Value::Integer(10), Value::Integer(20)]);
        let mut stream = codec.decode_start(&p, &element).unwrap();
        assert_eq!(stream.next(), Some(10));
        assert_eq!(stream.next(), Some(20));
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn element_failures_aggregate() {
        let p = PlainProvider;
        let codec = INTEGER.positive().stream();
        let value = vec![1, -2].into_iter();
        let err = codec.encode_start(&p, p.empty(), &value).unwrap_err();
        assert!(matches!(err, CodecError::InvalidElements { .. }));
    }
}
