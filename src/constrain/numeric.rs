//! Numeric abstractions for constrainable values
//!
//! Three refinement levels back the numeric constraint families:
//!
//! - [`Numeric`] — ordered values with a zero, enough for the sign and
//!   range constraints;
//! - [`Integral`] — whole numbers, adding parity, divisibility, and
//!   power-of-two predicates (via [`num_integer::Integer`]);
//! - [`Decimal`] — floating-point values, adding scale and precision
//!   inspection over the shortest round-tripping decimal rendering.
//!
//! Scale and precision follow the conventional decimal definitions:
//! `12.75` has scale 2 (digits after the point) and precision 4 (total
//! significant digits). The rendering-based computation is exact for
//! every value because `Display` for floats produces the shortest
//! decimal string that round-trips, never using exponent notation.

use std::fmt::Display;

use num_integer::Integer;

/// An ordered numeric value with a zero.
pub trait Numeric: Copy + PartialOrd + Display {
    /// The additive identity for this type.
    const ZERO: Self;
}

/// A whole-numbered [`Numeric`] supporting divisibility predicates.
pub trait Integral: Numeric {
    /// `true` if this value is even.
    fn is_even_value(self) -> bool;

    /// `true` if this value is divisible by `divisor` without remainder.
    fn is_divisible_by(self, divisor: Self) -> bool;

    /// `true` if this value is a strictly positive power of two.
    fn is_power_of_two_value(self) -> bool;
}

/// A floating-point [`Numeric`] with inspectable decimal structure.
pub trait Decimal: Numeric {
    /// The multiplicative identity for this type.
    const ONE: Self;

    /// The number of digits after the decimal point in the shortest
    /// round-tripping rendering of this value.
    fn scale_digits(self) -> u32;

    /// The total number of significant decimal digits in this value.
    fn precision_digits(self) -> u32;

    /// `true` if this value has no fractional part.
    fn is_integral_value(self) -> bool;
}

macro_rules! impl_integral {
    ($($t:ty),+) => {
        $(
            impl Numeric for $t {
                const ZERO: Self = 0;
            }

            impl Integral for $t {
                fn is_even_value(self) -> bool {
                    Integer::is_even(&self)
                }

                fn is_divisible_by(self, divisor: Self) -> bool {
                    self.is_multiple_of(&divisor)
                }

                fn is_power_of_two_value(self) -> bool {
                    self > 0 && (self & (self - 1)) == 0
                }
            }
        )+
    };
}

impl_integral!(i8, i16, i32, i64);

macro_rules! impl_decimal {
    ($($t:ty),+) => {
        $(
            impl Numeric for $t {
                const ZERO: Self = 0.0;
            }

            impl Decimal for $t {
                const ONE: Self = 1.0;

                fn scale_digits(self) -> u32 {
                    let rendered = format!("{}", self);
                    match rendered.split_once('.') {
                        Some((_, frac)) => frac.len() as u32,
                        None => 0,
                    }
                }

                fn precision_digits(self) -> u32 {
                    let rendered = format!("{}", self);
                    let digits: String = rendered
                        .chars()
                        .filter(char::is_ascii_digit)
                        .collect();
                    let significant = digits.trim_start_matches('0');
                    // Zero itself has one significant digit.
                    significant.len().max(1) as u32
                }

                fn is_integral_value(self) -> bool {
                    self.is_finite() && self.fract() == 0.0
                }
            }
        )+
    };
}

impl_decimal!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_and_divisibility() {
        assert!(4i32.is_even_value());
        assert!(!7i32.is_even_value());
        assert!(15i64.is_divisible_by(5));
        assert!(!15i64.is_divisible_by(4));
    }

    #[test]
    fn power_of_two_rejects_zero_and_negatives() {
        assert!(8i32.is_power_of_two_value());
        assert!(1i32.is_power_of_two_value());
        assert!(!0i32.is_power_of_two_value());
        assert!(!(-8i32).is_power_of_two_value());
        assert!(!6i32.is_power_of_two_value());
    }

    #[test]
    fn scale_of_shortest_rendering() {
        assert_eq!(12.75f64.scale_digits(), 2);
        assert_eq!(3.0f64.scale_digits(), 0);
        assert_eq!(0.5f32.scale_digits(), 1);
    }

    #[test]
    fn precision_counts_significant_digits() {
        assert_eq!(12.75f64.precision_digits(), 4);
        assert_eq!(0.5f64.precision_digits(), 1);
        assert_eq!(0.0f64.precision_digits(), 1);
        assert_eq!(100.0f64.precision_digits(), 3);
    }

    #[test]
    fn integral_check() {
        assert!(3.0f64.is_integral_value());
        assert!(!3.5f64.is_integral_value());
        assert!(!f64::NAN.is_integral_value());
    }
}
