//! Line segments used for collision queries.

use crate::{Point, Real, Scalar, Vector, VectorExt};

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    start: Point,
    end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns `end - start`.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> Scalar {
        self.direction().norm_scalar()
    }

    /// Returns `start + t * (end - start)`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point {
        self.start + self.direction() * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_endpoints() {
        let segment = LineSegment::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 4.0, 0.0));
        assert_eq!(segment.point_at(0.0), segment.start());
        assert_eq!(segment.point_at(1.0), segment.end());
        assert_eq!(segment.point_at(0.5), Point::new(1.0, 2.0, 0.0));
        assert_eq!(segment.length(), Real::sqrt(20.0));
    }
}
