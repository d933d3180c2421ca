//! Constraint decorators
//!
//! A constraint is a named predicate over a value, attached to a base
//! codec by wrapping it in a [`Constrained`] codec. Constraints are
//! checked against the value *before* delegating on encode, and against
//! the decoded value *after* delegating on decode, so an ill-formed
//! value can neither be written nor read.
//!
//! # Categories and replacement
//!
//! Every constraint belongs to a [`ConstraintCategory`]. Attaching a
//! constraint in a category that is already occupied **replaces** the
//! occupant (last write wins) and moves the category to the end of the
//! declaration order; constraints in distinct categories accumulate and
//! are all checked in declaration order, the first violation
//! short-circuiting. Hence `codec.min_length(10).min_length(2)` enforces
//! a minimum of 2, not both.
//!
//! Compound attachments decompose into their categories:
//! [`exact_length`](Constrained::exact_length) sets both the
//! minimum-length and maximum-length categories to the same bound, so a
//! later `exact_length` atomically replaces both, and a violation names
//! whichever bound actually failed.

pub mod length;
pub mod numeric;

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use regex::Regex;

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};
use crate::provider::TypeProvider;

pub use length::Length;
pub use numeric::{Decimal, Integral, Numeric};

/// The category a constraint occupies within a constraint set.
///
/// Categories are the unit of replacement: one active constraint per
/// category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConstraintCategory {
    MinimumLength,
    MaximumLength,
    MinimumValue,
    MaximumValue,
    Sign,
    Parity,
    Divisibility,
    PowerOfTwo,
    MinimumScale,
    MaximumScale,
    Precision,
    Integral,
    Normalized,
    Emptiness,
    Format,
}

impl ConstraintCategory {
    /// Whether violations in this category render in the numeric style
    /// (`"Violated <category> constraint (<detail>)"`) rather than the
    /// general style (`"<category> constraint violated: <detail>"`).
    const fn numeric_style(self) -> bool {
        matches!(
            self,
            ConstraintCategory::Parity
                | ConstraintCategory::Divisibility
                | ConstraintCategory::PowerOfTwo
                | ConstraintCategory::MinimumScale
                | ConstraintCategory::MaximumScale
                | ConstraintCategory::Precision
                | ConstraintCategory::Integral
                | ConstraintCategory::Normalized
        )
    }
}

impl Display for ConstraintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintCategory::MinimumLength => "minimum length",
            ConstraintCategory::MaximumLength => "maximum length",
            ConstraintCategory::MinimumValue => "minimum value",
            ConstraintCategory::MaximumValue => "maximum value",
            ConstraintCategory::Sign => "sign",
            ConstraintCategory::Parity => "parity",
            ConstraintCategory::Divisibility => "divisibility",
            ConstraintCategory::PowerOfTwo => "power of two",
            ConstraintCategory::MinimumScale => "minimum scale",
            ConstraintCategory::MaximumScale => "maximum scale",
            ConstraintCategory::Precision => "precision",
            ConstraintCategory::Integral => "integral",
            ConstraintCategory::Normalized => "normalized",
            ConstraintCategory::Emptiness => "emptiness",
            ConstraintCategory::Format => "format",
        })
    }
}

/// A single named predicate with its violation detail.
///
/// Equality considers the category and rendered detail, not the
/// predicate itself, so structurally identical constraint sets compare
/// equal.
pub struct Constraint<T: ?Sized> {
    category: ConstraintCategory,
    detail: String,
    check: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Constraint<T> {
    /// Builds a constraint from its category, parameter detail, and
    /// predicate.
    pub fn new<F>(category: ConstraintCategory, detail: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            category,
            detail: detail.into(),
            check: Arc::new(check),
        }
    }

    /// The category this constraint occupies.
    #[inline]
    pub const fn category(&self) -> ConstraintCategory {
        self.category
    }

    /// Evaluates the predicate against `value`.
    #[inline]
    pub fn holds(&self, value: &T) -> bool {
        (self.check)(value)
    }

    /// Renders the violation detail in the style of this constraint's
    /// category.
    pub fn violation(&self) -> String {
        if self.category.numeric_style() {
            format!("Violated {} constraint ({})", self.category, self.detail)
        } else {
            format!("{} constraint violated: {}", self.category, self.detail)
        }
    }
}

impl<T: ?Sized> Clone for Constraint<T> {
    fn clone(&self) -> Self {
        Self {
            category: self.category,
            detail: self.detail.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> PartialEq for Constraint<T> {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.detail == other.detail
    }
}

impl<T: ?Sized> Debug for Constraint<T> {
    // The predicate is unprintable; render category and detail only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("category", &self.category)
            .field("detail", &self.detail)
            .finish_non_exhaustive()
    }
}

/// A codec decorated with an ordered, category-keyed constraint set.
///
/// `Display` renders as
/// `Constrained<Name>[constraints=[<category>, ...]]` in declaration
/// order, per the observable `toString` contract.
#[derive(Clone, PartialEq, Debug)]
pub struct Constrained<C: Codec> {
    inner: C,
    constraints: Vec<Constraint<C::Value>>,
}

impl<C: Codec> Constrained<C> {
    /// Wraps `inner` with an empty constraint set.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            constraints: Vec::new(),
        }
    }

    /// Attaches `constraint`, replacing any occupant of its category.
    pub fn attach(mut self, constraint: Constraint<C::Value>) -> Self {
        self.constraints
            .retain(|existing| existing.category() != constraint.category());
        self.constraints.push(constraint);
        self
    }

    /// The active constraint categories, in declaration order.
    pub fn categories(&self) -> Vec<ConstraintCategory> {
        self.constraints.iter().map(Constraint::category).collect()
    }

    fn check(&self, value: &C::Value) -> CodecResult<()> {
        for constraint in &self.constraints {
            if !constraint.holds(value) {
                return Err(CodecError::Constraint {
                    type_name: self.inner.codec_name(),
                    detail: constraint.violation(),
                });
            }
        }
        Ok(())
    }
}

impl<C: Codec> Constrained<C>
where
    C::Value: Length + 'static,
{
    /// Requires a length of at least `min`.
    pub fn min_length(self, min: usize) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::MinimumLength,
            format!("expected length >= {min}"),
            move |value: &C::Value| value.length() >= min,
        ))
    }

    /// Requires a length of at most `max`.
    pub fn max_length(self, max: usize) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::MaximumLength,
            format!("expected length <= {max}"),
            move |value: &C::Value| value.length() <= max,
        ))
    }

    /// Requires a length of exactly `n`.
    ///
    /// Sets both length categories to `n`, so a subsequent
    /// `exact_length` replaces both atomically and a violation names
    /// whichever bound failed.
    pub fn exact_length(self, n: usize) -> Self {
        self.min_length(n).max_length(n)
    }

    /// Requires a length within the inclusive range `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn length_between(self, min: usize, max: usize) -> Self {
        assert!(
            min <= max,
            "length_between called with inverted bounds {min}..{max}"
        );
        self.min_length(min).max_length(max)
    }

    /// Requires an empty value.
    pub fn empty(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Emptiness,
            "expected empty value",
            |value: &C::Value| value.length() == 0,
        ))
    }

    /// Requires a non-empty value.
    pub fn not_empty(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Emptiness,
            "expected non-empty value",
            |value: &C::Value| value.length() > 0,
        ))
    }
}

impl<C: Codec> Constrained<C>
where
    C::Value: Numeric + Send + Sync + 'static,
{
    /// Requires a strictly positive value.
    pub fn positive(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Sign,
            "expected value > 0",
            |value: &C::Value| *value > C::Value::ZERO,
        ))
    }

    /// Requires a strictly negative value.
    pub fn negative(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Sign,
            "expected value < 0",
            |value: &C::Value| *value < C::Value::ZERO,
        ))
    }

    /// Requires a value of at least zero.
    pub fn non_negative(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Sign,
            "expected value >= 0",
            |value: &C::Value| *value >= C::Value::ZERO,
        ))
    }

    /// Requires a value strictly between `min` and `max`.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are inverted or unordered.
    pub fn between(self, min: C::Value, max: C::Value) -> Self {
        assert!(
            min <= max,
            "between called with inverted bounds {min}..{max}"
        );
        self.attach(Constraint::new(
            ConstraintCategory::MinimumValue,
            format!("expected value > {min}"),
            move |value: &C::Value| *value > min,
        ))
        .attach(Constraint::new(
            ConstraintCategory::MaximumValue,
            format!("expected value < {max}"),
            move |value: &C::Value| *value < max,
        ))
    }

    /// Requires a value within the inclusive range `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are inverted or unordered.
    pub fn between_or_equal(self, min: C::Value, max: C::Value) -> Self {
        assert!(
            min <= max,
            "between_or_equal called with inverted bounds {min}..{max}"
        );
        self.attach(Constraint::new(
            ConstraintCategory::MinimumValue,
            format!("expected value >= {min}"),
            move |value: &C::Value| *value >= min,
        ))
        .attach(Constraint::new(
            ConstraintCategory::MaximumValue,
            format!("expected value <= {max}"),
            move |value: &C::Value| *value <= max,
        ))
    }
}

impl<C: Codec> Constrained<C>
where
    C::Value: Integral + Send + Sync + 'static,
{
    /// Requires an even value.
    pub fn even(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Parity,
            "expected even value",
            |value: &C::Value| value.is_even_value(),
        ))
    }

    /// Requires an odd value.
    pub fn odd(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Parity,
            "expected odd value",
            |value: &C::Value| !value.is_even_value(),
        ))
    }

    /// Requires a value divisible by `divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn divisible_by(self, divisor: C::Value) -> Self {
        assert!(
            divisor != C::Value::ZERO,
            "divisible_by called with zero divisor"
        );
        self.attach(Constraint::new(
            ConstraintCategory::Divisibility,
            format!("divisor = {divisor}"),
            move |value: &C::Value| value.is_divisible_by(divisor),
        ))
    }

    /// Requires a strictly positive power of two.
    pub fn power_of_two(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::PowerOfTwo,
            "expected power of two",
            |value: &C::Value| value.is_power_of_two_value(),
        ))
    }
}

impl<C: Codec> Constrained<C>
where
    C::Value: Decimal + Send + Sync + 'static,
{
    /// Requires exactly `digits` digits after the decimal point.
    ///
    /// Sets both scale categories, mirroring
    /// [`exact_length`](Constrained::exact_length).
    pub fn scale(self, digits: u32) -> Self {
        self.min_scale(digits).max_scale(digits)
    }

    /// Requires at least `digits` digits after the decimal point.
    pub fn min_scale(self, digits: u32) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::MinimumScale,
            format!("expected scale >= {digits}"),
            move |value: &C::Value| value.scale_digits() >= digits,
        ))
    }

    /// Requires at most `digits` digits after the decimal point.
    pub fn max_scale(self, digits: u32) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::MaximumScale,
            format!("expected scale <= {digits}"),
            move |value: &C::Value| value.scale_digits() <= digits,
        ))
    }

    /// Requires at most `digits` significant digits in total.
    pub fn precision(self, digits: u32) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Precision,
            format!("expected precision <= {digits}"),
            move |value: &C::Value| value.precision_digits() <= digits,
        ))
    }

    /// Requires a value with no fractional part.
    pub fn integral(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Integral,
            "expected integral value",
            |value: &C::Value| value.is_integral_value(),
        ))
    }

    /// Requires a value in the normalized range `0.0..=1.0`.
    pub fn normalized(self) -> Self {
        self.attach(Constraint::new(
            ConstraintCategory::Normalized,
            "expected value in 0..=1",
            |value: &C::Value| *value >= C::Value::ZERO && *value <= C::Value::ONE,
        ))
    }
}

impl<C: Codec> Codec for Constrained<C> {
    type Value = C::Value;

    fn codec_name(&self) -> String {
        format!("Constrained{}", self.inner.codec_name())
    }

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Element,
        value: &Self::Value,
    ) -> CodecResult<P::Element> {
        self.check(value)?;
        self.inner.encode_start(provider, current, value)
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        element: &P::Element,
    ) -> CodecResult<Self::Value> {
        let value = self.inner.decode_start(provider, element)?;
        self.check(&value)?;
        Ok(value)
    }

    fn absence_tolerant(&self) -> bool {
        self.inner.absence_tolerant()
    }
}

impl<C: Codec> Constrained<C>
where
    C::Value: AsRef<str> + 'static,
{
    /// Requires string values matching the regular expression `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression; an
    /// ill-formed pattern is a programming error, not a data error.
    pub fn formatted(self, pattern: &str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|err| panic!("formatted called with invalid pattern: {err}"));
        self.attach(Constraint::new(
            ConstraintCategory::Format,
            format!("pattern = '{pattern}'"),
            move |value: &C::Value| regex.is_match(value.as_ref()),
        ))
    }
}

impl<C: Codec> Display for Constrained<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constrained{}[constraints=[", self.inner.codec_name())?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", constraint.category())?;
        }
        f.write_str("]]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::prim::{DOUBLE, INTEGER, STRING};
    use crate::provider::{PlainProvider, TypeProvider, Value};

    fn encode_str(codec: &impl Codec<Value = String>, s: &str) -> CodecResult<Value> {
        let p = PlainProvider;
        codec.encode_start(&p, p.empty(), &s.to_owned())
    }

    #[test]
    fn replacement_within_category() {
        let codec = STRING.min_length(10).min_length(2);
        assert!(encode_str(&codec, "abc").is_ok());
        assert!(encode_str(&codec, "a").is_err());
    }

    #[test]
    fn distinct_categories_accumulate() {
        let codec = STRING.min_length(2).max_length(4);
        assert!(encode_str(&codec, "ab").is_ok());
        assert!(encode_str(&codec, "a").is_err());
        assert!(encode_str(&codec, "abcde").is_err());
    }

    #[test]
    fn exact_length_names_violated_bound() {
        let codec = STRING.exact_length(3);
        let too_short = encode_str(&codec, "ab").unwrap_err().to_string();
        let too_long = encode_str(&codec, "abcd").unwrap_err().to_string();
        assert!(too_short.contains("minimum length"), "{too_short}");
        assert!(too_long.contains("maximum length"), "{too_long}");
    }

    #[test]
    fn general_violation_template() {
        let codec = STRING.min_length(5);
        let err = encode_str(&codec, "ab").unwrap_err().to_string();
        assert_eq!(
            err,
            "StringCodec does not meet constraints: \
             minimum length constraint violated: expected length >= 5"
        );
    }

    #[test]
    fn numeric_violation_template() {
        let p = PlainProvider;
        let codec = INTEGER.divisible_by(5);
        let err = codec.encode_start(&p, p.empty(), &7).unwrap_err().to_string();
        assert_eq!(
            err,
            "IntegerCodec does not meet constraints: \
             Violated divisibility constraint (divisor = 5)"
        );
    }

    #[test]
    fn decode_checks_after_inner_decode() {
        let p = PlainProvider;
        let codec = INTEGER.even();
        assert_eq!(codec.decode_start(&p, &Value::Integer(4)).unwrap(), 4);
        assert!(codec.decode_start(&p, &Value::Integer(5)).is_err());
    }

    #[test]
    fn parity_category_replaces() {
        let p = PlainProvider;
        let codec = INTEGER.even().odd();
        assert!(codec.encode_start(&p, p.empty(), &3).is_ok());
        assert!(codec.encode_start(&p, p.empty(), &4).is_err());
    }

    #[test]
    fn ranged_is_inclusive() {
        let p = PlainProvider;
        let codec = INTEGER.ranged(1, 10);
        assert!(codec.encode_start(&p, p.empty(), &1).is_ok());
        assert!(codec.encode_start(&p, p.empty(), &10).is_ok());
        assert!(codec.encode_start(&p, p.empty(), &0).is_err());
        assert!(codec.encode_start(&p, p.empty(), &11).is_err());
    }

    #[test]
    fn scale_and_precision() {
        let p = PlainProvider;
        let codec = DOUBLE.scale(2);
        assert!(codec.encode_start(&p, p.empty(), &1.25).is_ok());
        assert!(codec.encode_start(&p, p.empty(), &1.5).is_err());
        let precise = DOUBLE.precision(3);
        assert!(precise.encode_start(&p, p.empty(), &1.25).is_ok());
        assert!(precise.encode_start(&p, p.empty(), &1.255).is_err());
    }

    #[test]
    fn formatted_matches_pattern() {
        let codec = STRING.formatted("^[a-z]+$");
        assert!(encode_str(&codec, "abc").is_ok());
        assert!(encode_str(&codec, "Abc").is_err());
    }

    #[test]
    fn display_lists_categories_in_order() {
        let codec = STRING.min_length(1).max_length(9);
        assert_eq!(
            codec.to_string(),
            "ConstrainedStringCodec[constraints=[minimum length, maximum length]]"
        );
    }

    #[test]
    fn constrained_codecs_compare_structurally() {
        assert_eq!(STRING.min_length(3), STRING.min_length(3));
        assert_ne!(STRING.min_length(3), STRING.min_length(4));
    }

    #[test]
    #[should_panic(expected = "inverted bounds")]
    fn inverted_length_bounds_panic() {
        let _ = STRING.length_between(5, 2);
    }
}
