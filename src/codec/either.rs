//! Disjoint-union codec over two value types
//!
//! [`EitherCodec`] pairs a left and a right codec whose value types may
//! differ, transcoding an [`Either`] of the two. Decoding is biased:
//! the left codec is tried first, and the right codec only sees the
//! element if the left fails. When both branch value types decode from
//! the same element shape, the left branch therefore always wins; pick
//! branch order to disambiguate, or use distinguishable shapes.

use std::fmt::{self, Display};

use crate::codec::Codec;
use crate::either::Either;
use crate::error::{CodecError, CodecResult};
use crate::provider::TypeProvider;

/// Codec for [`Either`] values, decoding left-first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EitherCodec<L, R> {
    left: L,
    right: R,
}

impl<L: Codec, R: Codec> EitherCodec<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L: Codec, R: Codec> Codec for EitherCodec<L, R> {
    type Value = Either<L::Value, R::Value>;

    fn codec_name(&self) -> String {
        format!(
            "EitherCodec[{}, {}]",
            self.left.codec_name(),
            self.right.codec_name()
        )
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        match value {
            Either::Left(left) => self.left.encode_start(provider, current, left),
            Either::Right(right) => self.right.encode_start(provider, current, right),
        }
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        let left_err = match self.left.decode_start(provider, element) {
            Ok(value) => return Ok(Either::Left(value)),
            Err(err) => err,
        };
        match self.right.decode_start(provider, element) {
            Ok(value) => Ok(Either::Right(value)),
            Err(right_err) => Err(CodecError::NoMatch {
                left: Box::new(left_err),
                right: Box::new(right_err),
            }),
        }
    }
}

impl<L: Codec, R: Codec> Display for EitherCodec<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EitherCodec[{}, {}]",
            self.left.codec_name(),
            self.right.codec_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::prim::{BOOLEAN, INTEGER, STRING};
    use crate::provider::{PlainProvider, Value};

    #[test]
    fn decodes_each_branch_by_shape() {
        let p = PlainProvider;
        let codec = EitherCodec::new(INTEGER, STRING);

        let left = codec.encode_start(&p, p.empty(), &Either::Left(3)).unwrap();
        assert_eq!(codec.decode_start(&p, &left).unwrap(), Either::Left(3));

        let right = codec
            .encode_start(&p, p.empty(), &Either::Right("x".to_owned()))
            .unwrap();
        assert_eq!(
            codec.decode_start(&p, &right).unwrap(),
            Either::Right("x".to_owned())
        );
    }

    #[test]
    fn left_branch_wins_on_ambiguity() {
        let p = PlainProvider;
        // Both branches decode integers; the left one is preferred.
        let codec = EitherCodec::new(INTEGER, INTEGER);
        assert_eq!(
            codec.decode_start(&p, &Value::Integer(1)).unwrap(),
            Either::Left(1)
        );
    }

    #[test]
    fn both_failing_reports_both_errors() {
        let p = PlainProvider;
        let codec = EitherCodec::new(INTEGER, BOOLEAN);
        let err = codec
            .decode_start(&p, &Value::String("neither".to_owned()))
            .unwrap_err();
        match err {
            CodecError::NoMatch { .. } => {}
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }
}
