//! Plane representation and operations for BSP trees.

use crate::{GeometryError, LineSegment, Point, Scalar, Sign, Vector, VectorExt};

/// Unit normal of the plane spanned by `u` and `v`, or `None` if they are collinear.
pub(crate) fn unit_normal(u: &Vector, v: &Vector) -> Option<Vector> {
    if u.is_collinear_with(v) {
        return None;
    }
    u.cross(v).try_normalize(0.0)
}

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space: the points `p` with `normal · (p - anchor) = 0`.
///
/// The normal is not required to be unit length; use [`Plane::normalized`]
/// when signed distances must be metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    anchor: Point,
    normal: Vector,
}

impl Plane {
    /// Creates a plane through `anchor` with the given normal.
    ///
    /// Fails with [`GeometryError::ZeroVector`] if the normal is near zero.
    pub fn new(anchor: Point, normal: Vector) -> Result<Self, GeometryError> {
        if normal.is_near_zero() {
            return Err(GeometryError::ZeroVector);
        }
        Ok(Self { anchor, normal })
    }

    /// Creates a plane from three points, anchored at `a`, with a unit normal.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Fails with [`GeometryError::ZeroVector`] if one point lies within
    /// epsilon of the line through the other two.
    pub fn from_points(a: Point, b: Point, c: Point) -> Result<Self, GeometryError> {
        unit_normal(&(b - a), &(c - a))
            .map(|normal| Self { anchor: a, normal })
            .ok_or(GeometryError::ZeroVector)
    }

    /// Returns the point the plane was anchored at.
    #[inline]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the plane normal as stored (not necessarily unit length).
    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Returns the same plane with a unit-length normal.
    pub fn normalized(&self) -> Result<Self, GeometryError> {
        Ok(Self {
            anchor: self.anchor,
            normal: self.normal.to_unit()?,
        })
    }

    /// Computes `normal · (point - anchor)`.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero (within epsilon): point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: &Point) -> Scalar {
        self.normal.dot_scalar(&(point - self.anchor))
    }

    /// Classifies which side of the plane a point lies on.
    #[inline]
    pub fn classify_point(&self, point: &Point) -> PlaneSide {
        match self.signed_distance(point).sign() {
            Sign::Positive => PlaneSide::Front,
            Sign::Negative => PlaneSide::Back,
            Sign::Zero => PlaneSide::OnPlane,
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            anchor: self.anchor,
            normal: -self.normal,
        }
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    pub fn project_point(&self, point: &Point) -> Result<Point, GeometryError> {
        let scale = self
            .signed_distance(point)
            .checked_div(self.normal.norm_squared())?;
        Ok(point - self.normal * scale.value())
    }

    /// Returns `true` if both planes describe the same set of points:
    /// parallel normals and each anchor lying on the other plane.
    pub fn is_coincident_with(&self, other: &Plane) -> bool {
        let (Ok(a), Ok(b)) = (self.normalized(), other.normalized()) else {
            return false;
        };
        a.normal.cross(&b.normal).is_near_zero()
            && b.signed_distance(&a.anchor).is_zero()
            && a.signed_distance(&b.anchor).is_zero()
    }

    /// Intersects the infinite line `origin + t * direction` with the plane.
    ///
    /// Returns `(t, point)`. Fails with [`GeometryError::ParallelLine`] if the
    /// line is parallel to the plane.
    pub fn intersect_line(
        &self,
        origin: &Point,
        direction: &Vector,
    ) -> Result<(Scalar, Point), GeometryError> {
        let denom = self.normal.dot_scalar(direction);
        let t = self
            .normal
            .dot_scalar(&(self.anchor - origin))
            .checked_div(denom)
            .map_err(|_| GeometryError::ParallelLine)?;
        Ok((t, origin + direction * t.value()))
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns `Some((t, point))` where `t` is the interpolation parameter
    /// (0 = start, 1 = end). Returns `None` if the segment is parallel to the
    /// plane or the crossing lies outside the segment.
    pub fn intersect_segment(&self, segment: &LineSegment) -> Option<(Scalar, Point)> {
        let (t, point) = self
            .intersect_line(&segment.start(), &segment.direction())
            .ok()?;
        if t < 0.0 || t > 1.0 {
            return None;
        }
        Some((t, point))
    }
}
