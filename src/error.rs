//! General error types
//!
//! This module defines the two error channels used throughout the crate:
//! [`ProviderError`] for failures raised by a [`TypeProvider`] while
//! constructing, extracting, or merging tree elements, and [`CodecError`]
//! for failures raised by a [`Codec`] during encoding or decoding.
//!
//! The split is deliberate: provider errors describe problems at the level
//! of the generic tree model (wrong element kind, missing key, illegal
//! merge), while codec errors describe problems at the level of the value
//! domain (violated constraints, out-of-range sequence lengths, unparsable
//! map keys). A `ProviderError` that surfaces through a codec operation is
//! wrapped in [`CodecError::Provider`], preserving the original as a
//! [`source`](std::error::Error::source).
//!
//! Genuinely unrecoverable conditions, such as a combinator invoked with
//! inverted bounds, are *not* represented here; those are programming
//! errors at the call site and panic immediately.
//!
//! [`TypeProvider`]: crate::provider::TypeProvider
//! [`Codec`]: crate::codec::Codec

use std::error::Error;
use std::fmt::{self, Display};

/// Result alias for fallible [`TypeProvider`](crate::provider::TypeProvider) operations.
pub type ProvideResult<T> = std::result::Result<T, ProviderError>;

/// Result alias for fallible [`Codec`](crate::codec::Codec) operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Enumerated error type for failures at the generic tree-model level.
///
/// Every extraction failure distinguishes between three conditions that
/// are easily conflated: the element exists but has the wrong kind
/// (`WrongType`), the element is an explicit null (`NullValue`), and no
/// element is present at all (`Missing`).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ProviderError {
    /// An element of one kind was read as another.
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
    /// No element is associated with the requested key.
    Missing { key: String },
    /// An explicit null element was read as a concrete kind.
    NullValue { expected: &'static str },
    /// A value could not be represented as a tree element.
    Unrepresentable { kind: &'static str, detail: String },
    /// Two tree elements of incompatible kinds were merged.
    MergeConflict {
        into: &'static str,
        from: &'static str,
    },
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::WrongType { expected, actual } => {
                write!(f, "expected {expected} element, found {actual} element")
            }
            ProviderError::Missing { key } => {
                write!(f, "no element present for key '{key}'")
            }
            ProviderError::NullValue { expected } => {
                write!(f, "null element cannot be read as {expected}")
            }
            ProviderError::Unrepresentable { kind, detail } => {
                write!(f, "cannot represent {kind}: {detail}")
            }
            ProviderError::MergeConflict { into, from } => {
                write!(f, "cannot merge {from} element into {into} element")
            }
        }
    }
}

impl Error for ProviderError {}

/// Which half of the transcoding pair an aggregate failure occurred in.
///
/// Only used for error rendering, so that element-wise and field-wise
/// aggregates can share one variant per container shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Encode,
    Decode,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("encode"),
            Direction::Decode => f.write_str("decode"),
        }
    }
}

/// The container shape a length-range violation was reported against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SequenceKind {
    Array,
    List,
    Set,
}

impl Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Array => f.write_str("Array"),
            SequenceKind::List => f.write_str("List"),
            SequenceKind::Set => f.write_str("Set"),
        }
    }
}

/// Enumerated error type for recoverable failures during encoding or
/// decoding.
///
/// The rendered messages follow fixed templates so they are testable
/// verbatim; see the `Display` implementation.
#[derive(Clone, PartialEq, Debug)]
#[non_exhaustive]
pub enum CodecError {
    /// A required (non-nullable) value was null on the encode side.
    EncodeNull { type_name: String },
    /// A null tree element was decoded by a codec that does not
    /// tolerate null.
    DecodeNull { type_name: String },
    /// A value did not satisfy the active constraint set of a
    /// constrained codec.
    Constraint { type_name: String, detail: String },
    /// A sequence length fell outside the inclusive bounds of a
    /// bounded sequence codec.
    LengthOutOfRange {
        kind: SequenceKind,
        actual: usize,
        min: usize,
        max: usize,
    },
    /// One or more elements of a sequence failed to transcode,
    /// indexed by position.
    InvalidElements {
        direction: Direction,
        errors: Vec<(usize, CodecError)>,
    },
    /// A string key could not be decoded as the key type.
    InvalidKey { key: String, type_name: String },
    /// A required field was absent from a map-shaped element.
    MissingField { field: String },
    /// One or more fields of a grouped codec failed to transcode,
    /// keyed by field name.
    InvalidFields {
        direction: Direction,
        errors: Vec<(String, CodecError)>,
    },
    /// Neither variant of an either-shaped codec could decode the
    /// element; both failures are retained.
    NoMatch {
        left: Box<CodecError>,
        right: Box<CodecError>,
    },
    /// A provider operation failed beneath the codec.
    Provider(ProviderError),
    /// A free-form failure raised by a custom codec.
    Custom(String),
}

impl CodecError {
    /// Shorthand for [`CodecError::Custom`] from any displayable message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

fn write_indexed<K: Display>(
    f: &mut fmt::Formatter<'_>,
    errors: &[(K, CodecError)],
) -> fmt::Result {
    let mut first = true;
    for (at, err) in errors {
        if !first {
            f.write_str("; ")?;
        }
        write!(f, "{at}: {err}")?;
        first = false;
    }
    Ok(())
}

impl Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EncodeNull { type_name } => {
                write!(f, "Unable to encode null as {type_name}")
            }
            CodecError::DecodeNull { type_name } => {
                write!(f, "Unable to decode null value as {type_name}")
            }
            CodecError::Constraint { type_name, detail } => {
                write!(f, "{type_name} does not meet constraints: {detail}")
            }
            CodecError::LengthOutOfRange {
                kind,
                actual,
                min,
                max,
            } => {
                write!(f, "{kind} length '{actual}' is out of range: {min}..{max}")
            }
            CodecError::InvalidElements { direction, errors } => {
                write!(f, "Unable to {direction} some elements: ")?;
                write_indexed(f, errors)
            }
            CodecError::InvalidKey { key, type_name } => {
                write!(f, "Unable to decode key '{key}' as {type_name}")
            }
            CodecError::MissingField { field } => {
                write!(f, "no value present for required field '{field}'")
            }
            CodecError::InvalidFields { direction, errors } => {
                write!(f, "Unable to {direction} some fields: ")?;
                write_indexed(f, errors)
            }
            CodecError::NoMatch { left, right } => {
                write!(
                    f,
                    "Unable to decode either variant: left: {left}; right: {right}"
                )
            }
            CodecError::Provider(err) => {
                write!(f, "provider operation failed: {err}")
            }
            CodecError::Custom(msg) => f.write_str(msg),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecError::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for CodecError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<std::convert::Infallible> for CodecError {
    fn from(_void: std::convert::Infallible) -> Self {
        match _void {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn error_types_threadsafe() {
        dummy::<ProviderError>();
        dummy::<CodecError>();
    }

    #[test]
    fn length_template_verbatim() {
        let err = CodecError::LengthOutOfRange {
            kind: SequenceKind::Array,
            actual: 2,
            min: 3,
            max: 5,
        };
        assert_eq!(err.to_string(), "Array length '2' is out of range: 3..5");
    }

    #[test]
    fn null_templates_verbatim() {
        let enc = CodecError::EncodeNull {
            type_name: "IntegerCodec".to_owned(),
        };
        let dec = CodecError::DecodeNull {
            type_name: "IntegerCodec".to_owned(),
        };
        assert_eq!(enc.to_string(), "Unable to encode null as IntegerCodec");
        assert_eq!(
            dec.to_string(),
            "Unable to decode null value as IntegerCodec"
        );
    }

    #[test]
    fn key_template_verbatim() {
        let err = CodecError::InvalidKey {
            key: "florp".to_owned(),
            type_name: "BooleanCodec".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to decode key 'florp' as BooleanCodec"
        );
    }

    #[test]
    fn aggregate_rendering_orders_entries() {
        let err = CodecError::InvalidFields {
            direction: Direction::Decode,
            errors: vec![
                (
                    "age".to_owned(),
                    CodecError::MissingField {
                        field: "age".to_owned(),
                    },
                ),
                (
                    "name".to_owned(),
                    CodecError::MissingField {
                        field: "name".to_owned(),
                    },
                ),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("Unable to decode some fields: "));
        let age = rendered.find("age").unwrap();
        let name = rendered.find("name").unwrap();
        assert!(age < name);
    }
}
