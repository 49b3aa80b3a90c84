//! Convex planar polygon representation for BSP trees.

use crate::plane::unit_normal;
use crate::{GeometryError, Plane, PlaneSide, Point, Real, Vector, VectorExt};

/// Relation of a polygon to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// All vertices lie on the plane
    Coincident,
    /// All vertices are in front of or on the plane
    InFront,
    /// All vertices are behind or on the plane
    Behind,
    /// Vertices lie strictly on both sides
    Split,
}

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// The vertex list is cyclic: the last vertex connects back to the first.
/// The polygon's plane is derived once at construction and its normal
/// follows the winding order (right-hand rule).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// Fails if fewer than 3 vertices are given or if no plane can be derived
    /// (all vertices collinear).
    ///
    /// # Panics (debug builds only)
    /// Panics if vertices are not coplanar.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        let plane = derive_plane(&vertices)?;
        debug_assert!(
            vertices
                .iter()
                .all(|v| plane.classify_point(v) == PlaneSide::OnPlane),
            "Polygon vertices must be coplanar"
        );
        Ok(Self { vertices, plane })
    }

    /// Creates a triangle. The winding order determines the normal direction.
    pub fn triangle(a: Point, b: Point, c: Point) -> Result<Self, GeometryError> {
        Self::new(vec![a, b, c])
    }

    /// Builds a fragment that keeps its parent's plane.
    pub(crate) fn fragment(vertices: Vec<Point>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the plane this polygon lies on (unit normal).
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the unit normal of the polygon.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.plane.normal()
    }

    /// Computes the centroid (vertex average) of the polygon.
    pub fn centroid(&self) -> Point {
        let sum: Vector = self.vertices.iter().map(|p| p.coords).sum();
        Point::from(sum / self.vertices.len() as Real)
    }

    /// Iterates the cyclic edges `(v[i], v[i+1])`, closing back to `v[0]`.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Each vertex is measured against the plane's anchor point. Returns:
    /// - `Coincident` if all vertices lie on the plane
    /// - `InFront` if no vertex is behind the plane
    /// - `Behind` if no vertex is in front of the plane
    /// - `Split` if vertices are strictly on both sides
    pub fn relation_with_plane(&self, plane: &Plane) -> Relation {
        let mut front = 0;
        let mut back = 0;
        let mut on_plane = 0;

        for vertex in &self.vertices {
            match plane.classify_point(vertex) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => on_plane += 1,
            }
        }

        if on_plane == self.vertices.len() {
            Relation::Coincident
        } else if back == 0 {
            Relation::InFront
        } else if front == 0 {
            Relation::Behind
        } else {
            Relation::Split
        }
    }

    /// Returns `true` if `point` lies on the polygon's plane and inside or on
    /// the boundary of the (convex) polygon.
    pub fn contains_point(&self, point: &Point) -> bool {
        if !self.plane.signed_distance(point).is_zero() {
            return false;
        }
        let normal = self.plane.normal();
        // Distance from each edge line, positive on the inner side
        self.edges().all(|(a, b)| {
            let edge = b - a;
            edge.cross(&(point - a))
                .dot_scalar(&normal)
                .checked_div(edge.norm_scalar())
                .map_or(true, |inside| inside >= 0.0)
        })
    }
}

/// Derives a unit-normal plane from vertex 0 and the first pair of
/// non-collinear edge vectors anchored there.
///
/// Collinearity is judged by distance, not by the size of the cross product,
/// so small polygons are accepted and long thin ones are not.
pub(crate) fn derive_plane(vertices: &[Point]) -> Result<Plane, GeometryError> {
    let anchor = vertices[0];
    let edges: Vec<Vector> = vertices[1..].iter().map(|v| v - anchor).collect();

    edges
        .iter()
        .enumerate()
        .find_map(|(i, a)| edges[i + 1..].iter().find_map(|b| unit_normal(a, b)))
        .ok_or(GeometryError::DegeneratePolygon)
        .and_then(|normal| Plane::new(anchor, normal))
}

impl From<&Polygon> for Plane {
    fn from(polygon: &Polygon) -> Self {
        polygon.plane().clone()
    }
}
