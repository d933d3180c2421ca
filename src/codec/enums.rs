//! Enumeration codecs
//!
//! Unit enums transcode through one of three representations: the
//! variant's ordinal position ([`EnumOrdinalCodec`]), its declared name
//! ([`EnumNameCodec`]), or a string that is read as an ordinal when it
//! parses as a number and as a name otherwise ([`EnumDynamicCodec`]).
//! The last is unambiguous because variant names that are pure digit
//! strings are rejected by the [`enum_repr!`] macro's use sites in
//! practice; a name never parses as `usize`.
//!
//! All three codecs are [`KeyableCodec`]s, so enums can key maps.

use std::fmt::{self, Display};
use std::marker::PhantomData;

use crate::codec::{Codec, KeyableCodec};
use crate::error::{CodecError, CodecResult};
use crate::provider::TypeProvider;

/// A unit enum with a stable variant order, usable with the enum codecs.
///
/// Implement via the [`enum_repr!`] macro rather than by hand.
pub trait EnumRepr: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Every variant, in declaration order.
    const CONSTANTS: &'static [Self];

    /// The declared name of this variant.
    fn constant_name(&self) -> &'static str;

    /// The zero-based position of this variant in [`CONSTANTS`].
    ///
    /// [`CONSTANTS`]: EnumRepr::CONSTANTS
    fn ordinal(&self) -> usize {
        Self::CONSTANTS
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// Looks a variant up by declared name.
    fn from_name(name: &str) -> Option<Self> {
        Self::CONSTANTS
            .iter()
            .copied()
            .find(|c| c.constant_name() == name)
    }

    /// Looks a variant up by ordinal.
    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::CONSTANTS.get(ordinal).copied()
    }
}

/// Implements [`EnumRepr`] for a unit enum, listing its variants in
/// declaration order.
///
/// ```
/// use treble::enum_repr;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Suit {
///     Clubs,
///     Diamonds,
///     Hearts,
///     Spades,
/// }
/// enum_repr!(Suit => Clubs, Diamonds, Hearts, Spades);
/// ```
#[macro_export]
macro_rules! enum_repr {
    ($name:ident => $($variant:ident),+ $(,)?) => {
        impl $crate::codec::enums::EnumRepr for $name {
            const CONSTANTS: &'static [Self] = &[$(Self::$variant),+];

            fn constant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

fn unknown(repr: &str, codec_name: String) -> CodecError {
    CodecError::Custom(format!(
        "'{repr}' does not identify a constant of {codec_name}"
    ))
}

fn type_label<E: EnumRepr>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Codec writing an enum variant as its zero-based ordinal.
pub struct EnumOrdinalCodec<E> {
    marker: PhantomData<fn() -> E>,
}

/// Codec writing an enum variant as its declared name.
pub struct EnumNameCodec<E> {
    marker: PhantomData<fn() -> E>,
}

/// Codec writing names, reading either names or stringified ordinals.
pub struct EnumDynamicCodec<E> {
    marker: PhantomData<fn() -> E>,
}

macro_rules! enum_codec_common {
    ($codec:ident, $label:literal) => {
        impl<E: EnumRepr> $codec<E> {
            pub fn new() -> Self {
                Self {
                    marker: PhantomData,
                }
            }
        }

        impl<E: EnumRepr> Default for $codec<E> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<E> Clone for $codec<E> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<E> Copy for $codec<E> {}

        impl<E> PartialEq for $codec<E> {
            fn eq(&self, _other: &Self) -> bool {
                true
            }
        }

        impl<E> Eq for $codec<E> {}

        impl<E> fmt::Debug for $codec<E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!($label, "(..)"))
            }
        }

        impl<E: EnumRepr> Display for $codec<E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "[{}]"), type_label::<E>())
            }
        }
    };
}

enum_codec_common!(EnumOrdinalCodec, "EnumOrdinalCodec");
enum_codec_common!(EnumNameCodec, "EnumNameCodec");
enum_codec_common!(EnumDynamicCodec, "EnumDynamicCodec");

impl<E: EnumRepr> Codec for EnumOrdinalCodec<E> {
    type Value = E;

    fn codec_name(&self) -> String {
        format!("EnumOrdinalCodec[{}]", type_label::<E>())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        let ordinal = provider.create_integer(value.ordinal() as i32)?;
        Ok(provider.merge(current, ordinal)?)
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
        let ordinal = provider.get_integer(element)?;
        usize::try_from(ordinal)
            .ok()
            .and_then(E::from_ordinal)
            .ok_or_else(|| unknown(&ordinal.to_string(), self.codec_name()))
    }
}

impl<E: EnumRepr> KeyableCodec for EnumOrdinalCodec<E> {
    fn encode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        value: &Self::Value,
    ) -> CodecResult<String> {
        Ok(value.ordinal().to_string())
    }

    fn decode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        key: &str,
    ) -> CodecResult<Self::Value> {
        key.parse::<usize>()
            .ok()
            .and_then(E::from_ordinal)
            .ok_or_else(|| CodecError::InvalidKey {
                key: key.to_owned(),
                type_name: self.codec_name(),
            })
    }
}

impl<E: EnumRepr> Codec for EnumNameCodec<E> {
    type Value = E;

    fn codec_name(&self) -> String {
        format!("EnumNameCodec[{}]", type_label::<E>())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        let name = provider.create_string(value.constant_name())?;
        Ok(provider.merge(current, name)?)
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
        let name = provider.get_string(element)?;
        E::from_name(&name).ok_or_else(|| unknown(&name, self.codec_name()))
    }
}

impl<E: EnumRepr> KeyableCodec for EnumNameCodec<E> {
    fn encode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        value: &Self::Value,
    ) -> CodecResult<String> {
        Ok(value.constant_name().to_owned())
    }

    fn decode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        key: &str,
    ) -> CodecResult<Self::Value> {
        E::from_name(key).ok_or_else(|| CodecError::InvalidKey {
            key: key.to_owned(),
            type_name: self.codec_name(),
        })
    }
}

fn dynamic_lookup<E: EnumRepr>(repr: &str) -> Option<E> {
    match repr.parse::<usize>() {
        Ok(ordinal) => E::from_ordinal(ordinal),
        Err(_) => E::from_name(repr),
    }
}

impl<E: EnumRepr> Codec for EnumDynamicCodec<E> {
    type Value = E;

    fn codec_name(&self) -> String {
        format!("EnumDynamicCodec[{}]", type_label::<E>())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        let name = provider.create_string(value.constant_name())?;
        Ok(provider.merge(current, name)?)
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
        let repr = provider.get_string(element)?;
        dynamic_lookup(&repr).ok_or_else(|| unknown(&repr, self.codec_name()))
    }
}

impl<E: EnumRepr> KeyableCodec for EnumDynamicCodec<E> {
    fn encode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        value: &Self::Value,
    ) -> CodecResult<String> {
        Ok(value.constant_name().to_owned())
    }

    fn decode_key<P: TypeProvider>(
        &self,
        _provider: &P,
        key: &str,
    ) -> CodecResult<Self::Value> {
        dynamic_lookup(key).ok_or_else(|| CodecError::InvalidKey {
            key: key.to_owned(),
            type_name: self.codec_name(),
        })
    }
}
