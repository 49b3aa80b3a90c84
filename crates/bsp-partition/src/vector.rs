//! Point and vector aliases with tolerant helpers.

use nalgebra::{Point3, Vector3};

use crate::{GeometryError, Real, Scalar, EPSILON};

/// A position in 3D space.
pub type Point = Point3<Real>;

/// A direction or displacement in 3D space.
pub type Vector = Vector3<Real>;

/// Tolerant operations on [`Vector`].
pub trait VectorExt {
    /// Dot product as a tolerant scalar.
    fn dot_scalar(&self, other: &Vector) -> Scalar;

    /// Euclidean length as a tolerant scalar.
    fn norm_scalar(&self) -> Scalar;

    /// Returns the unit vector in the same direction.
    ///
    /// Fails with [`GeometryError::ZeroVector`] if the length is within epsilon of zero.
    fn to_unit(&self) -> Result<Vector, GeometryError>;

    /// Returns `true` if every component is within epsilon of zero.
    fn is_near_zero(&self) -> bool;

    /// Returns `true` if the two vectors span no plane: the tip of the shorter
    /// one lies within epsilon of the line along the longer one.
    ///
    /// The test is a length, so it does not depend on the scale of the input.
    fn is_collinear_with(&self, other: &Vector) -> bool;
}

impl VectorExt for Vector {
    #[inline]
    fn dot_scalar(&self, other: &Vector) -> Scalar {
        Scalar::new(self.dot(other))
    }

    #[inline]
    fn norm_scalar(&self) -> Scalar {
        Scalar::new(self.norm())
    }

    fn to_unit(&self) -> Result<Vector, GeometryError> {
        self.try_normalize(EPSILON).ok_or(GeometryError::ZeroVector)
    }

    #[inline]
    fn is_near_zero(&self) -> bool {
        self.iter().all(|c| c.abs() <= EPSILON)
    }

    fn is_collinear_with(&self, other: &Vector) -> bool {
        self.cross(other).norm() <= EPSILON * self.norm().max(other.norm())
    }
}

/// Returns `true` if two points are within epsilon of each other.
#[inline]
pub fn points_coincide(a: &Point, b: &Point) -> bool {
    (a - b).norm_scalar().is_zero()
}
