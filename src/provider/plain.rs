//! Built-in plain-value provider
//!
//! This module defines [`Value`], a self-contained in-memory tree element
//! covering every kind the framework defines, and [`PlainProvider`], the
//! [`TypeProvider`] implementation over it. The plain provider is the
//! reference implementation of the provider contract: format modules for
//! concrete wire syntaxes live outside this crate, but every behavior
//! they must reproduce is observable here.
//!
//! `Value` keeps the empty sentinel ([`Value::Empty`]) distinct from the
//! explicit null element ([`Value::Null`]): the former marks "nothing was
//! written", the latter "a null was written". Maps preserve insertion
//! order.

use std::fmt::{self, Display};

use indexmap::IndexMap;

use crate::error::{ProvideResult, ProviderError};
use crate::provider::TypeProvider;

/// A format-neutral tree element.
///
/// Structural equality; integer and floating-point kinds are kept
/// distinct even when numerically equal (`Value::Byte(1) != Value::Integer(1)`),
/// because a concrete wire format may represent them differently.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Value {
    /// The canonical empty element, used as a merge seed.
    #[default]
    Empty,
    /// An explicit null.
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// An ordered list of elements.
    List(Vec<Value>),
    /// An insertion-ordered, string-keyed map of elements.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// The kind of this element, as a diagnostic noun.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Integer(_) => "integer",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Returns `true` for the [`Empty`](Value::Empty) sentinel.
    #[inline]
    #[must_use]
    pub const fn is_empty_sentinel(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns `true` for the explicit [`Null`](Value::Null) element.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => f.write_str("<empty>"),
            Value::Null => f.write_str("null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{key}\": {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Object(entries)
    }
}

#[cfg(feature = "serde_impls")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Empty | Value::Null => serializer.serialize_unit(),
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Integer(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::List(items) => items.serialize(serializer),
            Value::Object(entries) => entries.serialize(serializer),
        }
    }
}

fn wrong_type(expected: &'static str, actual: &Value) -> ProviderError {
    match actual {
        Value::Null => ProviderError::NullValue { expected },
        other => ProviderError::WrongType {
            expected,
            actual: other.kind(),
        },
    }
}

/// The [`TypeProvider`] over [`Value`] trees.
///
/// A zero-sized, copyable value; construct once and pass everywhere.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct PlainProvider;

impl PlainProvider {
    /// Constructs the plain provider.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TypeProvider for PlainProvider {
    type Element = Value;

    fn empty(&self) -> Value {
        Value::Empty
    }

    fn create_boolean(&self, value: bool) -> ProvideResult<Value> {
        Ok(Value::Boolean(value))
    }

    fn create_byte(&self, value: i8) -> ProvideResult<Value> {
        Ok(Value::Byte(value))
    }

    fn create_short(&self, value: i16) -> ProvideResult<Value> {
        Ok(Value::Short(value))
    }

    fn create_integer(&self, value: i32) -> ProvideResult<Value> {
        Ok(Value::Integer(value))
    }

    fn create_long(&self, value: i64) -> ProvideResult<Value> {
        Ok(Value::Long(value))
    }

    fn create_float(&self, value: f32) -> ProvideResult<Value> {
        Ok(Value::Float(value))
    }

    fn create_double(&self, value: f64) -> ProvideResult<Value> {
        Ok(Value::Double(value))
    }

    fn create_string(&self, value: &str) -> ProvideResult<Value> {
        Ok(Value::String(value.to_owned()))
    }

    fn create_null(&self) -> ProvideResult<Value> {
        Ok(Value::Null)
    }

    fn create_list(&self, items: Vec<Value>) -> ProvideResult<Value> {
        Ok(Value::List(items))
    }

    fn create_map(&self) -> ProvideResult<Value> {
        Ok(Value::Object(IndexMap::new()))
    }

    fn create_map_from(&self, entries: IndexMap<String, Value>) -> ProvideResult<Value> {
        Ok(Value::Object(entries))
    }

    fn get_boolean(&self, element: &Value) -> ProvideResult<bool> {
        match element {
            Value::Boolean(v) => Ok(*v),
            other => Err(wrong_type("boolean", other)),
        }
    }

    fn get_byte(&self, element: &Value) -> ProvideResult<i8> {
        match element {
            Value::Byte(v) => Ok(*v),
            other => Err(wrong_type("byte", other)),
        }
    }

    fn get_short(&self, element: &Value) -> ProvideResult<i16> {
        match element {
            Value::Byte(v) => Ok(i16::from(*v)),
            Value::Short(v) => Ok(*v),
            other => Err(wrong_type("short", other)),
        }
    }

    fn get_integer(&self, element: &Value) -> ProvideResult<i32> {
        match element {
            Value::Byte(v) => Ok(i32::from(*v)),
            Value::Short(v) => Ok(i32::from(*v)),
            Value::Integer(v) => Ok(*v),
            other => Err(wrong_type("integer", other)),
        }
    }

    fn get_long(&self, element: &Value) -> ProvideResult<i64> {
        match element {
            Value::Byte(v) => Ok(i64::from(*v)),
            Value::Short(v) => Ok(i64::from(*v)),
            Value::Integer(v) => Ok(i64::from(*v)),
            Value::Long(v) => Ok(*v),
            other => Err(wrong_type("long", other)),
        }
    }

    fn get_float(&self, element: &Value) -> ProvideResult<f32> {
        match element {
            Value::Float(v) => Ok(*v),
            other => Err(wrong_type("float", other)),
        }
    }

    fn get_double(&self, element: &Value) -> ProvideResult<f64> {
        match element {
            Value::Float(v) => Ok(f64::from(*v)),
            Value::Double(v) => Ok(*v),
            other => Err(wrong_type("double", other)),
        }
    }

    fn get_string(&self, element: &Value) -> ProvideResult<String> {
        match element {
            Value::String(v) => Ok(v.clone()),
            other => Err(wrong_type("string", other)),
        }
    }

    fn get_list(&self, element: &Value) -> ProvideResult<Vec<Value>> {
        match element {
            Value::List(items) => Ok(items.clone()),
            other => Err(wrong_type("list", other)),
        }
    }

    fn get_map(&self, element: &Value) -> ProvideResult<IndexMap<String, Value>> {
        match element {
            Value::Object(entries) => Ok(entries.clone()),
            other => Err(wrong_type("object", other)),
        }
    }

    fn has(&self, container: &Value, key: &str) -> ProvideResult<bool> {
        match container {
            Value::Object(entries) => Ok(entries.contains_key(key)),
            other => Err(wrong_type("object", other)),
        }
    }

    fn get(&self, container: &Value, key: &str) -> ProvideResult<Value> {
        match container {
            Value::Object(entries) => entries
                .get(key)
                .cloned()
                .ok_or_else(|| ProviderError::Missing {
                    key: key.to_owned(),
                }),
            other => Err(wrong_type("object", other)),
        }
    }

    fn set(&self, container: Value, key: &str, value: Value) -> ProvideResult<Value> {
        match container {
            // An empty seed silently becomes a map on first write.
            Value::Empty => {
                let mut entries = IndexMap::new();
                entries.insert(key.to_owned(), value);
                Ok(Value::Object(entries))
            }
            Value::Object(mut entries) => {
                entries.insert(key.to_owned(), value);
                Ok(Value::Object(entries))
            }
            other => Err(wrong_type("object", &other)),
        }
    }

    fn merge(&self, into: Value, from: Value) -> ProvideResult<Value> {
        match (into, from) {
            (Value::Empty | Value::Null, from) => Ok(from),
            (into, Value::Empty | Value::Null) => Ok(into),
            (Value::List(mut lhs), Value::List(rhs)) => {
                lhs.extend(rhs);
                Ok(Value::List(lhs))
            }
            (Value::Object(mut lhs), Value::Object(rhs)) => {
                // `from` wins on key conflicts.
                for (key, value) in rhs {
                    lhs.insert(key, value);
                }
                Ok(Value::Object(lhs))
            }
            (into, from) => Err(ProviderError::MergeConflict {
                into: into.kind(),
                from: from.kind(),
            }),
        }
    }

    fn is_null(&self, element: &Value) -> bool {
        element.is_null()
    }

    fn get_empty(&self, element: &Value) -> ProvideResult<Value> {
        match element {
            Value::Empty | Value::Null => Ok(Value::Empty),
            other => Err(wrong_type("empty", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn primitive_round_trips() {
        let p = PlainProvider::new();
        assert_eq!(p.get_boolean(&p.create_boolean(true).unwrap()), Ok(true));
        assert_eq!(p.get_byte(&p.create_byte(-3).unwrap()), Ok(-3));
        assert_eq!(p.get_short(&p.create_short(1000).unwrap()), Ok(1000));
        assert_eq!(p.get_integer(&p.create_integer(42).unwrap()), Ok(42));
        assert_eq!(p.get_long(&p.create_long(1 << 40).unwrap()), Ok(1 << 40));
        assert_eq!(p.get_float(&p.create_float(0.5).unwrap()), Ok(0.5));
        assert_eq!(p.get_double(&p.create_double(2.25).unwrap()), Ok(2.25));
        assert_eq!(
            p.get_string(&p.create_string("abc").unwrap()),
            Ok("abc".to_owned())
        );
    }

    #[test]
    fn extraction_widens_but_never_narrows() {
        let p = PlainProvider;
        assert_eq!(p.get_long(&Value::Byte(7)), Ok(7));
        assert_eq!(p.get_double(&Value::Float(0.25)), Ok(0.25));
        assert_eq!(
            p.get_byte(&Value::Integer(7)),
            Err(ProviderError::WrongType {
                expected: "byte",
                actual: "integer",
            })
        );
    }

    #[test]
    fn null_is_distinct_from_wrong_type() {
        let p = PlainProvider;
        assert_eq!(
            p.get_integer(&Value::Null),
            Err(ProviderError::NullValue {
                expected: "integer"
            })
        );
        assert_eq!(
            p.get_integer(&Value::String("7".to_owned())),
            Err(ProviderError::WrongType {
                expected: "integer",
                actual: "string",
            })
        );
    }

    #[test]
    fn missing_key_is_distinct_from_wrong_container() {
        let p = PlainProvider;
        let container = obj(&[("a", Value::Integer(1))]);
        assert_eq!(p.has(&container, "a"), Ok(true));
        assert_eq!(p.has(&container, "b"), Ok(false));
        assert_eq!(
            p.get(&container, "b"),
            Err(ProviderError::Missing {
                key: "b".to_owned()
            })
        );
        assert!(matches!(
            p.get(&Value::Integer(0), "b"),
            Err(ProviderError::WrongType { .. })
        ));
    }

    #[test]
    fn set_promotes_empty_seed_to_object() {
        let p = PlainProvider;
        let container = p.set(Value::Empty, "x", Value::Integer(1)).unwrap();
        assert_eq!(container, obj(&[("x", Value::Integer(1))]));
    }

    #[test]
    fn set_null_is_a_present_field() {
        let p = PlainProvider;
        let container = p.set(p.create_map().unwrap(), "x", Value::Null).unwrap();
        assert_eq!(p.has(&container, "x"), Ok(true));
        assert!(p.is_null(&p.get(&container, "x").unwrap()));
    }

    #[test]
    fn merge_sentinels_yield_other_side() {
        let p = PlainProvider;
        assert_eq!(p.merge(Value::Empty, Value::Integer(1)), Ok(Value::Integer(1)));
        assert_eq!(p.merge(Value::Integer(1), Value::Null), Ok(Value::Integer(1)));
    }

    #[test]
    fn merge_lists_concatenates() {
        let p = PlainProvider;
        let merged = p
            .merge(
                Value::List(vec![Value::Integer(1)]),
                Value::List(vec![Value::Integer(2), Value::Integer(3)]),
            )
            .unwrap();
        assert_eq!(
            merged,
            Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );
    }

    #[test]
    fn merge_maps_unions_with_from_winning() {
        let p = PlainProvider;
        let into = obj(&[("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let from = obj(&[("b", Value::Integer(20)), ("c", Value::Integer(3))]);
        let merged = p.merge(into, from).unwrap();
        assert_eq!(
            merged,
            obj(&[
                ("a", Value::Integer(1)),
                ("b", Value::Integer(20)),
                ("c", Value::Integer(3)),
            ])
        );
    }

    #[test]
    fn merge_incompatible_kinds_fails() {
        let p = PlainProvider;
        assert_eq!(
            p.merge(Value::Integer(1), Value::List(vec![])),
            Err(ProviderError::MergeConflict {
                into: "integer",
                from: "list",
            })
        );
    }

    #[test]
    fn empty_and_null_normalize_to_empty() {
        let p = PlainProvider;
        assert_eq!(p.get_empty(&Value::Empty), Ok(Value::Empty));
        assert_eq!(p.get_empty(&Value::Null), Ok(Value::Empty));
        assert!(p.get_empty(&Value::Integer(0)).is_err());
    }

    #[test]
    fn display_renders_nested_structure() {
        let value = obj(&[
            ("name", Value::String("ada".to_owned())),
            ("tags", Value::List(vec![Value::Integer(1), Value::Integer(2)])),
        ]);
        assert_eq!(value.to_string(), r#"{"name": "ada", "tags": [1, 2]}"#);
    }
}
