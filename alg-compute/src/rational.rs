//! Exact rational numbers.
//!
//! [`Rational`] wraps [`rug::Rational`], which always stores its value in lowest terms with a
//! positive denominator, so two rationals are equal exactly when their numerators and
//! denominators are.

use alg_error::Error;
use crate::{
    error::{DivisionByZero, InvalidType, UnsupportedOperation},
    primitive::{exact_root, int},
};
use rug::{ops::Pow, Integer};
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact rational number, always kept in lowest terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rational(rug::Rational);

/// A scalar that can be combined into a [`Rational`] with [`Rational::from_pair`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// An integer.
    Integer(i64),

    /// A floating-point number. Its shortest decimal representation is used.
    Float(f64),

    /// An exact rational.
    Rational(Rational),
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Integer(n.into())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Integer(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<Rational> for Scalar {
    fn from(n: Rational) -> Self {
        Scalar::Rational(n)
    }
}

impl TryFrom<Scalar> for Rational {
    type Error = Error;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar {
            Scalar::Integer(n) => Ok(Rational::from(n)),
            Scalar::Float(n) => Rational::from_f64(n),
            Scalar::Rational(n) => Ok(n),
        }
    }
}

impl Rational {
    /// Creates a rational from a numerator and a denominator, reducing it to lowest terms.
    ///
    /// Returns [`DivisionByZero`] if the denominator is zero.
    pub fn new(numer: impl Into<Integer>, denom: impl Into<Integer>) -> Result<Self, Error> {
        let (numer, denom) = (numer.into(), denom.into());
        if denom.is_zero() {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(rug::Rational::from((numer, denom))))
    }

    /// Creates a rational from a pair of scalars, as `numer / denom`.
    ///
    /// If either scalar is a float, both are converted through their decimal representations, so
    /// `from_pair(0.5, 2)` is exactly `1/4`.
    pub fn from_pair(numer: impl Into<Scalar>, denom: impl Into<Scalar>) -> Result<Self, Error> {
        let numer = Rational::try_from(numer.into())?;
        let denom = Rational::try_from(denom.into())?;
        numer.checked_div(&denom)
    }

    /// Creates the rational exactly equal to the shortest decimal representation of the float.
    ///
    /// Returns [`InvalidType`] for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self, Error> {
        if !value.is_finite() {
            return Err(Error::spanless(InvalidType {
                value: value.to_string(),
                reason: "only finite numbers can be represented exactly".to_string(),
            }));
        }

        // `Display` for `f64` never uses scientific notation
        Self::from_decimal_str(&value.to_string())
    }

    /// Parses a decimal number, such as `12`, `-0.25`, `3.` or `.5`.
    pub fn from_decimal_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::spanless(InvalidType {
            value: s.to_string(),
            reason: "expected a decimal number".to_string(),
        });

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty()
            || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let mut numer = format!("{}{}", whole, fraction)
            .parse::<Integer>()
            .map_err(|_| invalid())?;
        if negative {
            numer = -numer;
        }
        let exponent = u32::try_from(fraction.len()).map_err(|_| invalid())?;
        Self::new(numer, int(10).pow(exponent))
    }

    /// Returns zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns one.
    pub fn one() -> Self {
        Self::from(1)
    }

    /// Returns one half.
    pub fn half() -> Self {
        Self(rug::Rational::from((1, 2)))
    }

    /// Returns the numerator.
    pub fn numer(&self) -> &Integer {
        self.0.numer()
    }

    /// Returns the denominator, which is always positive.
    pub fn denom(&self) -> &Integer {
        self.0.denom()
    }

    /// Returns true if the rational is an integer.
    pub fn is_integer(&self) -> bool {
        *self.denom() == 1
    }

    /// Returns true if the rational is zero.
    pub fn is_zero(&self) -> bool {
        self.numer().is_zero()
    }

    /// Returns true if the rational is one.
    pub fn is_one(&self) -> bool {
        *self.numer() == 1 && *self.denom() == 1
    }

    /// Returns true if the rational is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0.cmp0() == Ordering::Less
    }

    /// Returns true if the rational is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0.cmp0() == Ordering::Greater
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the integer value, if the rational is an integer.
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numer().clone())
    }

    /// Returns the integer value as an [`i64`], if the rational is an integer that fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer()?.to_i64()
    }

    /// Returns the closest [`f64`].
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }

    /// Returns the largest integer less than or equal to the rational.
    pub fn floor(&self) -> Self {
        Self(self.0.clone().floor())
    }

    /// Divides by another rational, returning [`DivisionByZero`] if it is zero.
    pub fn checked_div(&self, rhs: &Rational) -> Result<Self, Error> {
        if rhs.is_zero() {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(rug::Rational::from(&self.0 / &rhs.0)))
    }

    /// Returns the reciprocal, or [`DivisionByZero`] if the rational is zero.
    pub fn recip(&self) -> Result<Self, Error> {
        Self::one().checked_div(self)
    }

    /// Checks that `rhs` is usable as the divisor of a floor division or modulo.
    fn check_divisor(rhs: &Rational) -> Result<(), Error> {
        if rhs.is_zero() {
            Err(Error::spanless(DivisionByZero))
        } else if rhs.is_negative() {
            Err(Error::spanless(UnsupportedOperation {
                operation: format!("floor division or modulo by negative number {}", rhs),
            }))
        } else {
            Ok(())
        }
    }

    /// Returns `floor(self / rhs)`. The divisor must be positive.
    pub fn floor_div(&self, rhs: &Rational) -> Result<Self, Error> {
        Self::check_divisor(rhs)?;
        Ok(self.checked_div(rhs)?.floor())
    }

    /// Returns `self - rhs * floor(self / rhs)`, which lies in `[0, rhs)`. The divisor must be
    /// positive.
    pub fn modulo(&self, rhs: &Rational) -> Result<Self, Error> {
        let quotient = self.floor_div(rhs)?;
        Ok(self - &(rhs * &quotient))
    }

    /// Raises the rational to an integer power.
    ///
    /// Returns [`DivisionByZero`] if zero is raised to a negative power.
    pub fn pow(&self, exponent: i32) -> Result<Self, Error> {
        let base = if exponent < 0 { self.recip()? } else { self.clone() };
        Ok(Self(base.0.pow(exponent.unsigned_abs())))
    }

    /// Returns the exact `n`-th root of the rational, if there is one.
    pub fn root_exact(&self, n: u32) -> Option<Self> {
        let numer = exact_root(self.numer(), n)?;
        let denom = exact_root(self.denom(), n)?;
        Some(Self(rug::Rational::from((numer, denom))))
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Rational {
                fn from(n: $ty) -> Self {
                    Self(rug::Rational::from(n))
                }
            }
        )*
    };
}

from_integer!(i32, i64, u32, u64, Integer);

impl From<rug::Rational> for Rational {
    fn from(n: rug::Rational) -> Self {
        Self(n)
    }
}

impl FromStr for Rational {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $trait<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational(rug::Rational::from((&self.0).$method(&rhs.0)))
            }
        }

        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational(self.0.$method(rhs.0))
            }
        }

        impl $assign_trait<&Rational> for Rational {
            fn $assign_method(&mut self, rhs: &Rational) {
                self.0.$assign_method(&rhs.0);
            }
        }

        impl $assign_trait for Rational {
            fn $assign_method(&mut self, rhs: Rational) {
                self.0.$assign_method(rhs.0);
            }
        }
    };
}

binary_op!(Add, add, AddAssign, add_assign);
binary_op!(Sub, sub, SubAssign, sub_assign);
binary_op!(Mul, mul, MulAssign, mul_assign);

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(rug::Rational::from(-&self.0))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}
