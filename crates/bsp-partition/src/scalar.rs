//! Epsilon-tolerant scalar used for every geometric sign test.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{GeometryError, Real};

/// Values closer than this are considered equal.
pub const EPSILON: Real = 1e-6;

/// Sign of a scalar with the epsilon band collapsed to [`Sign::Zero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

/// A floating value whose comparisons treat anything within [`EPSILON`] as equal.
///
/// Arithmetic mirrors native floating point, except that division, square root,
/// inverse trig and logarithms fail with a [`GeometryError`] instead of
/// producing NaN or infinity.
///
/// Tolerant equality is not transitive, so `Scalar` implements `PartialEq` and
/// `PartialOrd` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar(Real);

impl Scalar {
    pub const ZERO: Scalar = Scalar(0.0);
    pub const ONE: Scalar = Scalar(1.0);

    #[inline]
    pub const fn new(value: Real) -> Self {
        Self(value)
    }

    /// Returns the raw floating value.
    #[inline]
    pub const fn value(self) -> Real {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.abs() <= EPSILON
    }

    /// Classifies the value as positive, negative or zero (within epsilon).
    #[inline]
    pub fn sign(self) -> Sign {
        if self.0 > EPSILON {
            Sign::Positive
        } else if self.0 < -EPSILON {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Divides by `rhs`, failing if `rhs` is within epsilon of zero.
    pub fn checked_div(self, rhs: impl Into<Scalar>) -> Result<Self, GeometryError> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Self(self.0 / rhs.0))
    }

    pub fn sqrt(self) -> Result<Self, GeometryError> {
        if self.0 < 0.0 {
            return Err(GeometryError::NegativeSqrt(self.0));
        }
        Ok(Self(self.0.sqrt()))
    }

    #[inline]
    pub fn pow(self, exponent: Real) -> Self {
        Self(self.0.powf(exponent))
    }

    /// Returns the smaller value; ties (within epsilon) return `other`.
    pub fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// Returns the larger value; ties (within epsilon) return `other`.
    pub fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    #[inline]
    pub fn sin(self) -> Self {
        Self(self.0.sin())
    }

    #[inline]
    pub fn cos(self) -> Self {
        Self(self.0.cos())
    }

    #[inline]
    pub fn tan(self) -> Self {
        Self(self.0.tan())
    }

    pub fn asin(self) -> Result<Self, GeometryError> {
        if !(-1.0..=1.0).contains(&self.0) {
            return Err(GeometryError::InverseTrigDomain(self.0));
        }
        Ok(Self(self.0.asin()))
    }

    pub fn acos(self) -> Result<Self, GeometryError> {
        if !(-1.0..=1.0).contains(&self.0) {
            return Err(GeometryError::InverseTrigDomain(self.0));
        }
        Ok(Self(self.0.acos()))
    }

    #[inline]
    pub fn atan(self) -> Self {
        Self(self.0.atan())
    }

    #[inline]
    pub fn exp(self) -> Self {
        Self(self.0.exp())
    }

    /// Natural logarithm, failing for non-positive input.
    pub fn ln(self) -> Result<Self, GeometryError> {
        if self.0 <= 0.0 {
            return Err(GeometryError::NonPositiveLog(self.0));
        }
        Ok(Self(self.0.ln()))
    }
}

impl From<Real> for Scalar {
    #[inline]
    fn from(value: Real) -> Self {
        Self(value)
    }
}

impl From<Scalar> for Real {
    #[inline]
    fn from(value: Scalar) -> Self {
        value.0
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() <= EPSILON
    }
}

impl PartialEq<Real> for Scalar {
    #[inline]
    fn eq(&self, other: &Real) -> bool {
        *self == Scalar(*other)
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.0.is_nan() || other.0.is_nan() {
            None
        } else if self == other {
            Some(Ordering::Equal)
        } else if self.0 < other.0 {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Greater)
        }
    }
}

impl PartialOrd<Real> for Scalar {
    #[inline]
    fn partial_cmp(&self, other: &Real) -> Option<Ordering> {
        self.partial_cmp(&Scalar(*other))
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Self::Output {
        Scalar(-self.0)
    }
}

macro_rules! impl_arith {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Scalar {
            type Output = Scalar;

            #[inline]
            fn $method(self, rhs: Scalar) -> Self::Output {
                Scalar(self.0 $op rhs.0)
            }
        }

        impl $trait<Real> for Scalar {
            type Output = Scalar;

            #[inline]
            fn $method(self, rhs: Real) -> Self::Output {
                Scalar(self.0 $op rhs)
            }
        }

        impl $assign_trait for Scalar {
            #[inline]
            fn $assign_method(&mut self, rhs: Scalar) {
                self.0 = self.0 $op rhs.0;
            }
        }

        impl $assign_trait<Real> for Scalar {
            #[inline]
            fn $assign_method(&mut self, rhs: Real) {
                self.0 = self.0 $op rhs;
            }
        }
    };
}

impl_arith!(Add, add, AddAssign, add_assign, +);
impl_arith!(Sub, sub, SubAssign, sub_assign, -);
impl_arith!(Mul, mul, MulAssign, mul_assign, *);

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
