//! Optional and nullable codecs
//!
//! Two distinct treatments of absence. [`OptionalCodec`] silently omits
//! `None` when encoding (or substitutes a configured default) and maps
//! absence back to `None` when decoding. [`NullableCodec`] keeps the
//! slot visible: `None` encodes as an explicit null element, so a
//! format that distinguishes "missing" from "null" round-trips the
//! difference. Both report themselves absence-tolerant, so grouped
//! product codecs decode a missing field through them instead of
//! failing.

use std::fmt::{self, Display};

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};
use crate::provider::TypeProvider;

enum DefaultSource<T> {
    None,
    Value(T),
    Supplier(Box<dyn Fn() -> T + Send + Sync>),
}

impl<T: fmt::Debug> fmt::Debug for DefaultSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSource::None => f.write_str("None"),
            DefaultSource::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultSource::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}

/// Codec for [`Option`] values that encodes `None` as *absence*.
///
/// With no configured default, encoding `None` leaves the element under
/// construction untouched. A default value or supplier changes that:
/// `None` then encodes as the substitute, so the field is always
/// present on the wire.
#[derive(Debug)]
pub struct OptionalCodec<C: Codec> {
    inner: C,
    default: DefaultSource<C::Value>,
}

impl<C: Codec> OptionalCodec<C> {
    /// Wraps `inner`; `None` encodes as nothing.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            default: DefaultSource::None,
        }
    }

    /// Wraps `inner`; `None` encodes as `default`.
    pub fn with_default(inner: C, default: C::Value) -> Self
    where
        C::Value: Clone + Send + Sync + 'static,
    {
        Self {
            inner,
            default: DefaultSource::Value(default),
        }
    }

    /// Wraps `inner`; `None` encodes as a fresh value from `supplier`.
    pub fn with_supplier<F>(inner: C, supplier: F) -> Self
    where
        F: Fn() -> C::Value + Send + Sync + 'static,
    {
        Self {
            inner,
            default: DefaultSource::Supplier(Box::new(supplier)),
        }
    }
}

impl<C: Codec + PartialEq> PartialEq for OptionalCodec<C>
where
    C::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        // Suppliers are opaque, so two supplier-backed codecs never
        // compare equal.
        self.inner == other.inner
            && match (&self.default, &other.default) {
                (DefaultSource::None, DefaultSource::None) => true,
                (DefaultSource::Value(a), DefaultSource::Value(b)) => a == b,
                _ => false,
            }
    }
}

impl<C: Codec> Codec for OptionalCodec<C> {
    type Value = Option<C::Value>;

    fn codec_name(&self) -> String {
        format!("OptionalCodec[{}]", self.inner.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        match value {
            Some(present) => self.inner.encode_start(provider, current, present),
            None => match &self.default {
                DefaultSource::None => Ok(current),
                DefaultSource::Value(default) => {
                    self.inner.encode_start(provider, current, default)
                }
                DefaultSource::Supplier(supplier) => {
                    self.inner.encode_start(provider, current, &supplier())
                }
            },
        }
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        if provider.is_null(element) || *element == provider.empty() {
            return Ok(None);
        }
        self.inner.decode_start(provider, element).map(Some)
    }

    fn absence_tolerant(&self) -> bool {
        true
    }
}

impl<C: Codec> Display for OptionalCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionalCodec[{}]", self.inner.codec_name())
    }
}

/// Codec for [`Option`] values that encodes `None` as an explicit null
/// element.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NullableCodec<C: Codec> {
    inner: C,
}

impl<C: Codec> NullableCodec<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for NullableCodec<C> {
    type Value = Option<C::Value>;

    fn codec_name(&self) -> String {
        format!("NullableCodec[{}]", self.inner.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        match value {
            Some(present) => self.inner.encode_start(provider, current, present),
            None => {
                // A provider without a native null cannot encode None.
                let null = provider.create_null().map_err(|_| CodecError::EncodeNull {
                    type_name: self.codec_name(),
                })?;
                Ok(provider.merge(current, null)?)
            }
        }
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        if provider.is_null(element) || *element == provider.empty() {
            return Ok(None);
        }
        self.inner.decode_start(provider, element).map(Some)
    }

    fn absence_tolerant(&self) -> bool {
        true
    }
}

impl<C: Codec> Display for NullableCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NullableCodec[{}]", self.inner.codec_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::prim::{INTEGER, STRING};
    use crate::provider::{PlainProvider, Value};

    #[test]
    fn optional_none_encodes_as_nothing() {
        let p = PlainProvider;
        let codec = INTEGER.optional();
        let element = codec.encode_start(&p, p.empty(), &None).unwrap();
        assert_eq!(element, p.empty());
    }

    #[test]
    fn optional_round_trips_present_values() {
        let p = PlainProvider;
        let codec = STRING.optional();
        let value = Some("here".to_owned());
        let element = codec.encode_start(&p, p.empty(), &value).unwrap();
        assert_eq!(codec.decode_start(&p, &element).unwrap(), value);
    }

    #[test]
    fn optional_decodes_null_and_empty_to_none() {
        let p = PlainProvider;
        let codec = INTEGER.optional();
        assert_eq!(codec.decode_start(&p, &Value::Null).unwrap(), None);
        assert_eq!(codec.decode_start(&p, &p.empty()).unwrap(), None);
    }

    #[test]
    fn optional_with_default_substitutes() {
        let p = PlainProvider;
        let codec = INTEGER.optional_or(42);
        let element = codec.encode_start(&p, p.empty(), &None).unwrap();
        assert_eq!(element, Value::Integer(42));
    }

    #[test]
    fn optional_with_supplier_invokes_per_encode() {
        let p = PlainProvider;
        let codec = INTEGER.optional_or_else(|| 7);
        let element = codec.encode_start(&p, p.empty(), &None).unwrap();
        assert_eq!(element, Value::Integer(7));
        // Present values bypass the supplier entirely.
        let element = codec.encode_start(&p, p.empty(), &Some(9)).unwrap();
        assert_eq!(element, Value::Integer(9));
    }

    #[test]
    fn nullable_none_encodes_explicit_null() {
        let p = PlainProvider;
        let codec = INTEGER.nullable();
        let element = codec.encode_start(&p, p.empty(), &None).unwrap();
        assert_eq!(element, Value::Null);
        assert_eq!(codec.decode_start(&p, &element).unwrap(), None);
    }

    #[test]
    fn nullable_round_trips_present_values() {
        let p = PlainProvider;
        let codec = INTEGER.nullable();
        let element = codec.encode_start(&p, p.empty(), &Some(5)).unwrap();
        assert_eq!(codec.decode_start(&p, &element).unwrap(), Some(5));
    }

    #[test]
    fn malformed_present_value_still_fails() {
        let p = PlainProvider;
        let codec = INTEGER.optional();
        assert!(codec
            .decode_start(&p, &Value::String("nope".to_owned()))
            .is_err());
    }

    #[test]
    fn both_report_absence_tolerant() {
        assert!(INTEGER.optional().absence_tolerant());
        assert!(INTEGER.nullable().absence_tolerant());
        assert!(!INTEGER.absence_tolerant());
    }
}
