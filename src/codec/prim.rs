//! Primitive leaf codecs
//!
//! One zero-sized codec per primitive kind of the tree model, plus the
//! value-constants (`BOOLEAN`, `BYTE`, ... `STRING`) that serve as the
//! conventional entry points for composition:
//!
//! ```
//! use treble::codec::Codec;
//! use treble::codec::prim::INTEGER;
//! use treble::provider::{PlainProvider, TypeProvider};
//!
//! let provider = PlainProvider::new();
//! let codec = INTEGER.list();
//! let element = codec
//!     .encode_start(&provider, provider.empty(), &vec![1, 2, 3])
//!     .unwrap();
//! assert_eq!(codec.decode_start(&provider, &element).unwrap(), vec![1, 2, 3]);
//! ```
//!
//! All primitive codecs are also [`KeyableCodec`]s; keys transcode
//! through their canonical string forms.

use std::fmt::{self, Display};

use crate::codec::{Codec, KeyableCodec};
use crate::error::{CodecError, CodecResult};
use crate::provider::TypeProvider;

macro_rules! primitive_codec {
    ($(#[$docs:meta])* $codec:ident, $name:literal, $value:ty, $create:ident, $get:ident) => {
        $(#[$docs])*
        #[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
        pub struct $codec;

        impl Codec for $codec {
            type Value = $value;

            fn codec_name(&self) -> String {
                $name.to_owned()
            }

            fn encode_start<P: TypeProvider>(
                &self,
                provider: &P,
                current: P::Element,
                value: &Self::Value,
            ) -> CodecResult<P::Element> {
                let element = provider.$create(*value)?;
                Ok(provider.merge(current, element)?)
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
                Ok(provider.$get(element)?)
            }
        }

        impl Display for $codec {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($name)
            }
        }
    };
}

macro_rules! parseable_key {
    ($codec:ident) => {
        impl KeyableCodec for $codec {
            fn encode_key<P: TypeProvider>(
                &self,
                _provider: &P,
                value: &Self::Value,
            ) -> CodecResult<String> {
                Ok(value.to_string())
            }

            fn decode_key<P: TypeProvider>(
                &self,
                _provider: &P,
                key: &str,
            ) -> CodecResult<Self::Value> {
                key.parse().map_err(|_| CodecError::InvalidKey {
                    key: key.to_owned(),
                    type_name: self.codec_name(),
                })
            }
        }
    };
}

primitive_codec! {
    /// Codec for `bool` values.
    BooleanCodec, "BooleanCodec", bool, create_boolean, get_boolean
}
primitive_codec! {
    /// Codec for `i8` values ("byte" in the tree model).
    ByteCodec, "ByteCodec", i8, create_byte, get_byte
}
primitive_codec! {
    /// Codec for `i16` values ("short" in the tree model).
    ShortCodec, "ShortCodec", i16, create_short, get_short
}
primitive_codec! {
    /// Codec for `i32` values ("integer" in the tree model).
    IntegerCodec, "IntegerCodec", i32, create_integer, get_integer
}
primitive_codec! {
    /// Codec for `i64` values ("long" in the tree model).
    LongCodec, "LongCodec", i64, create_long, get_long
}
primitive_codec! {
    /// Codec for `f32` values ("float" in the tree model).
    FloatCodec, "FloatCodec", f32, create_float, get_float
}
primitive_codec! {
    /// Codec for `f64` values ("double" in the tree model).
    DoubleCodec, "DoubleCodec", f64, create_double, get_double
}

parseable_key!(BooleanCodec);
parseable_key!(ByteCodec);
parseable_key!(ShortCodec);
parseable_key!(IntegerCodec);
parseable_key!(LongCodec);
parseable_key!(FloatCodec);
parseable_key!(DoubleCodec);

/// Codec for owned `String` values.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn codec_name(&self) -> String {
        "StringCodec".to_owned()
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        let element = provider.create_string(value)?;
        Ok(provider.merge(current, element)?)
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
        Ok(provider.get_string(element)?)
    }
}

impl Display for StringCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StringCodec")
    }
}

impl KeyableCodec for StringCodec {
    fn encode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        value: &Self::Value,
    ) -> CodecResult<String> {
        Ok(value.clone())
    }

    fn decode_key<P: TypeProvider>(&self, _provider: &P, key: &str) -> CodecResult<Self::Value> {
        Ok(key.to_owned())
    }
}

/// Codec value-constant for [`BooleanCodec`].
pub const BOOLEAN: BooleanCodec = BooleanCodec;
/// Codec value-constant for [`ByteCodec`].
pub const BYTE: ByteCodec = ByteCodec;
/// Codec value-constant for [`ShortCodec`].
pub const SHORT: ShortCodec = ShortCodec;
/// Codec value-constant for [`IntegerCodec`].
pub const INTEGER: IntegerCodec = IntegerCodec;
/// Codec value-constant for [`LongCodec`].
pub const LONG: LongCodec = LongCodec;
/// Codec value-constant for [`FloatCodec`].
pub const FLOAT: FloatCodec = FloatCodec;
/// Codec value-constant for [`DoubleCodec`].
pub const DOUBLE: DoubleCodec = DoubleCodec;
/// Codec value-constant for [`StringCodec`].
pub const STRING: StringCodec = StringCodec;
