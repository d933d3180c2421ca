//! Fallback codec over one value type
//!
//! Where [`EitherCodec`](crate::codec::either::EitherCodec) joins two
//! *different* value types, [`AlternativeCodec`] layers two codecs for
//! the *same* value type: a primary that handles both directions, and a
//! secondary consulted only when the primary fails to decode. The
//! typical use is reading legacy representations while always writing
//! the current one.

use std::fmt::{self, Display};

use crate::codec::Codec;
use crate::error::CodecResult;
use crate::provider::TypeProvider;

/// Codec that encodes through `primary` and decodes through `primary`
/// with `secondary` as a fallback.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AlternativeCodec<C, A> {
    primary: C,
    secondary: A,
}

impl<C, A> AlternativeCodec<C, A>
where
    C: Codec,
    A: Codec<Value = C::Value>,
{
    pub fn new(primary: C, secondary: A) -> Self {
        Self { primary, secondary }
    }
}

impl<C, A> Codec for AlternativeCodec<C, A>
where
    C: Codec,
    A: Codec<Value = C::Value>,
{
    type Value = C::Value;

    fn codec_name(&self) -> String {
        format!(
            "AlternativeCodec[{}, {}]",
            self.primary.codec_name(),
            self.secondary.codec_name()
        )
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        self.primary.encode_start(provider, current, value)
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        match self.primary.decode_start(provider, element) {
            Ok(value) => Ok(value),
            Err(_) => self.secondary.decode_start(provider, element),
        }
    }

    fn absence_tolerant(&self) -> bool {
        self.primary.absence_tolerant()
    }
}

impl<C, A> Display for AlternativeCodec<C, A>
where
    C: Codec,
    A: Codec<Value = C::Value>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AlternativeCodec[{}, {}]",
            self.primary.codec_name(),
            self.secondary.codec_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::prim::{IntegerCodec, INTEGER};
    use crate::error::CodecError;
    use crate::provider::{PlainProvider, TypeProvider, Value};

    /// Decodes an integer written out as a decimal string, a stand-in
    /// for a legacy representation.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct StringifiedInteger;

    impl Codec for StringifiedInteger {
        type Value = i32;

        fn codec_name(&self) -> String {
            "StringifiedInteger".to_owned()
        }

        fn encode_start<P: TypeProvider>(
            &self,
            provider: &P,
            current: P::Element,
            value: &Self::Value,
        ) -> CodecResult<P::Element> {
            let text = provider.create_string(&value.to_string())?;
            Ok(provider.merge(current, text)?)
        }

        fn decode_start<P: TypeProvider>(
            &self,
            provider: &P,
            element: &P::Element,
        ) -> CodecResult<Self::Value> {
            let text = provider.get_string(element)?;
            text.parse()
                .map_err(|_| CodecError::Custom(format!("not a stringified integer: '{text}'")))
        }
    }

    #[test]
    fn primary_handles_both_directions() {
        let p = PlainProvider;
        let codec = INTEGER.or_else(StringifiedInteger);
        let element = codec.encode_start(&p, p.empty(), &12).unwrap();
        assert_eq!(element, Value::Integer(12));
        assert_eq!(codec.decode_start(&p, &element).unwrap(), 12);
    }

    #[test]
    fn secondary_catches_legacy_shape() {
        let p = PlainProvider;
        let codec = INTEGER.or_else(StringifiedInteger);
        assert_eq!(
            codec
                .decode_start(&p, &Value::String("34".to_owned()))
                .unwrap(),
            34
        );
    }

    #[test]
    fn secondary_failure_surfaces() {
        let p = PlainProvider;
        let codec = INTEGER.or_else(StringifiedInteger);
        assert!(codec
            .decode_start(&p, &Value::String("nope".to_owned()))
            .is_err());
    }

    #[test]
    fn alternatives_compare_structurally() {
        assert_eq!(
            AlternativeCodec::new(IntegerCodec, StringifiedInteger),
            AlternativeCodec::new(IntegerCodec, StringifiedInteger)
        );
    }
}
