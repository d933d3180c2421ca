//! Two-sided sum type
//!
//! [`Either<L, R>`] holds exactly one of a left-hand or right-hand value.
//! Unlike [`std::result::Result`], neither side carries a success or
//! failure connotation; it is a plain domain-level alternative, usable
//! both as a serializable value in its own right (via
//! [`EitherCodec`](crate::codec::either::EitherCodec)) and as a return
//! shape for operations with two equally legitimate outcomes.

use std::fmt::{self, Display};

/// A value of one of two possible types.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Constructs a left-hand value.
    #[inline]
    #[must_use]
    pub const fn left(value: L) -> Self {
        Self::Left(value)
    }

    /// Constructs a right-hand value.
    #[inline]
    #[must_use]
    pub const fn right(value: R) -> Self {
        Self::Right(value)
    }

    /// Returns `true` if this is a [`Left`](Either::Left) value.
    #[inline]
    #[must_use]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a [`Right`](Either::Right) value.
    #[inline]
    #[must_use]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Returns a reference to the left-hand value, if present.
    #[inline]
    pub const fn as_left(&self) -> Option<&L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns a reference to the right-hand value, if present.
    #[inline]
    pub const fn as_right(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Destructs into the left-hand value, if present.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Destructs into the right-hand value, if present.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Returns the left-hand value.
    ///
    /// # Panics
    ///
    /// Panics if this is a [`Right`](Either::Right) value.
    pub fn unwrap_left(self) -> L {
        match self {
            Self::Left(value) => value,
            Self::Right(_) => panic!("called `Either::unwrap_left` on a `Right` value"),
        }
    }

    /// Returns the right-hand value.
    ///
    /// # Panics
    ///
    /// Panics if this is a [`Left`](Either::Left) value.
    pub fn unwrap_right(self) -> R {
        match self {
            Self::Left(_) => panic!("called `Either::unwrap_right` on a `Left` value"),
            Self::Right(value) => value,
        }
    }

    /// Applies `op` to the left-hand value, leaving a right-hand value
    /// untouched.
    pub fn map_left<T, F: FnOnce(L) -> T>(self, op: F) -> Either<T, R> {
        match self {
            Self::Left(value) => Either::Left(op(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies `op` to the right-hand value, leaving a left-hand value
    /// untouched.
    pub fn map_right<T, F: FnOnce(R) -> T>(self, op: F) -> Either<L, T> {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(op(value)),
        }
    }

    /// Exchanges the left and right sides.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }
}

impl<L: Display, R: Display> Display for Either<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => write!(f, "Left({value})"),
            Self::Right(value) => write!(f, "Right({value})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidedness() {
        let l: Either<i32, String> = Either::left(7);
        let r: Either<i32, String> = Either::right("seven".to_owned());
        assert!(l.is_left() && !l.is_right());
        assert!(r.is_right() && !r.is_left());
        assert_eq!(l.as_left(), Some(&7));
        assert_eq!(r.as_right().map(String::as_str), Some("seven"));
    }

    #[test]
    fn map_leaves_other_side_untouched() {
        let l: Either<i32, i32> = Either::left(3);
        assert_eq!(l.map_left(|x| x * 2), Either::Left(6));
        assert_eq!(Either::<i32, i32>::right(3).map_left(|x| x * 2), Either::Right(3));
    }

    #[test]
    fn swap_round_trips() {
        let l: Either<u8, char> = Either::left(1);
        assert_eq!(l.swap().swap(), l);
    }

    #[test]
    #[should_panic(expected = "unwrap_left")]
    fn unwrap_left_on_right_panics() {
        Either::<i32, i32>::right(0).unwrap_left();
    }
}
