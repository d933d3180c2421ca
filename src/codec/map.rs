//! Homogeneous map codec
//!
//! [`MapCodec`] transcodes an [`IndexMap`] through a map-shaped element.
//! Keys go through a [`KeyableCodec`]'s string conversion, values
//! through an ordinary inner codec, and insertion order survives both
//! directions. Per-entry decode failures are collected exhaustively and
//! reported as one aggregate error keyed by the offending key string.

use std::fmt::{self, Display};
use std::hash::Hash;

use indexmap::IndexMap;

use crate::codec::{Codec, KeyableCodec};
use crate::error::{CodecError, CodecResult, Direction};
use crate::provider::TypeProvider;

/// Codec for [`IndexMap`]s with keyable keys and arbitrary values.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MapCodec<K, V> {
    key: K,
    value: V,
}

impl<K, V> MapCodec<K, V>
where
    K: KeyableCodec,
    V: Codec,
    K::Value: Hash + Eq,
{
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Codec for MapCodec<K, V>
where
    K: KeyableCodec,
    V: Codec,
    K::Value: Hash + Eq,
{
    type Value = IndexMap<K::Value, V::Value>;

    fn codec_name(&self) -> String {
        format!(
            "MapCodec[{}, {}]",
            self.key.codec_name(),
            self.value.codec_name()
        )
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        let mut entries = IndexMap::with_capacity(value.len());
        let mut errors = Vec::new();
        for (k, v) in value {
            // An unencodable key has no string to report under, so it
            // aborts the whole encode instead of joining the aggregate.
            let key = self.key.encode_key(provider, k)?;
            match self.value.encode_start(provider, provider.empty(), v) {
                Ok(encoded) => {
                    entries.insert(key, encoded);
                }
                Err(err) => errors.push((key, err)),
            }
        }
        if !errors.is_empty() {
            return Err(CodecError::InvalidFields {
                direction: Direction::Encode,
                errors,
            });
        }
        let map = provider.create_map_from(entries)?;
        Ok(provider.merge(current, map)?)
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
        let entries = provider.get_map(element)?;
        let mut decoded = IndexMap::with_capacity(entries.len());
        let mut errors = Vec::new();
        for (key, item) in &entries {
            let k = match self.key.decode_key(provider, key) {
                Ok(k) => k,
                Err(err) => {
                    errors.push((key.clone(), err));
                    continue;
                }
            };
            match self.value.decode_start(provider, item) {
                Ok(v) => {
                    decoded.insert(k, v);
                }
                Err(err) => errors.push((key.clone(), err)),
            }
        }
        if !errors.is_empty() {
            return Err(CodecError::InvalidFields {
                direction: Direction::Decode,
                errors,
            });
        }
        Ok(decoded)
    }
}

impl<K, V> Display for MapCodec<K, V>
where
    K: KeyableCodec,
    V: Codec,
    K::Value: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MapCodec[{}, {}]",
            self.key.codec_name(),
            self.value.codec_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::prim::{INTEGER, STRING};
    use crate::provider::{PlainProvider, Value};

    #[test]
    fn string_keyed_map_round_trips_in_order() {
        let p = PlainProvider;
        let codec = MapCodec::new(STRING, INTEGER);
        let mut value = IndexMap::new();
        value.insert("zeta".to_owned(), 1);
        value.insert("alpha".to_owned(), 2);
        let element = codec.encode_start(&p, p.empty(), &value).unwrap();
        let decoded = codec.decode_start(&p, &element).unwrap();
        assert_eq!(decoded, value);
        let keys: Vec<&String> = decoded.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn numeric_keys_transcode_as_strings() {
        let p = PlainProvider;
        let codec = MapCodec::new(INTEGER, STRING);
        let mut value = IndexMap::new();
        value.insert(7, "seven".to_owned());
        let element = codec.encode_start(&p, p.empty(), &value).unwrap();
        match &element {
            Value::Object(map) => assert!(map.contains_key("7")),
            other => panic!("expected an object, got {other:?}"),
        }
        assert_eq!(codec.decode_start(&p, &element).unwrap(), value);
    }

    #[test]
    fn unparsable_key_reports_its_text() {
        let p = PlainProvider;
        let codec = MapCodec::new(INTEGER, STRING);
        let mut entries = IndexMap::new();
        entries.insert("oops".to_owned(), Value::String("v".to_owned()));
        let element = Value::Object(entries);
        let err = codec.decode_start(&p, &element).unwrap_err();
        assert!(err
            .to_string()
            .contains("Unable to decode key 'oops' as IntegerCodec"));
    }

    #[test]
    fn entry_failures_aggregate_by_key() {
        let p = PlainProvider;
        let codec = MapCodec::new(STRING, INTEGER);
        let mut entries = IndexMap::new();
        entries.insert("good".to_owned(), Value::Integer(1));
        entries.insert("bad".to_owned(), Value::Boolean(true));
        entries.insert("worse".to_owned(), Value::String("x".to_owned()));
        let element = Value::Object(entries);
        let err = codec.decode_start(&p, &element).unwrap_err();
        match err {
            CodecError::InvalidFields { errors, .. } => {
                let keys: Vec<&String> = errors.iter().map(|(k, _)| k).collect();
                assert_eq!(keys, vec!["bad", "worse"]);
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_null_and_non_map_shapes() {
        let p = PlainProvider;
        let codec = MapCodec::new(STRING, INTEGER);
        assert!(codec.decode_start(&p, &Value::Null).is_err());
        assert!(codec.decode_start(&p, &Value::Integer(3)).is_err());
    }
}
