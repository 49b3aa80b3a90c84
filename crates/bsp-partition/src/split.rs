//! Polygon splitting against an arbitrary plane.

use log::{trace, warn};

use crate::polygon::derive_plane;
use crate::vector::points_coincide;
use crate::{GeometryError, Plane, PlaneSide, Point, Polygon, Relation, Scalar, Sign};

/// Outcome of splitting a polygon by a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// The polygon crossed the plane and was cut in two.
    Pieces {
        /// Part on the front (non-negative) side of the plane
        positive: Polygon,
        /// Part on the back (non-positive) side of the plane
        negative: Polygon,
    },
    /// The polygon stays in one piece and belongs on the given side.
    ///
    /// Returned for polygons that do not cross the plane, and for crossings
    /// whose thinner side collapses below 3 distinct non-collinear vertices.
    /// In the latter case the side is the one whose piece survived, or the
    /// one the polygon reaches deepest into if neither did.
    Whole(PlaneSide),
}

impl Polygon {
    /// Splits the polygon by a plane.
    ///
    /// Walks the cyclic edges (Sutherland-Hodgman style) and builds two vertex
    /// lists: each vertex goes to the side matching its sign (both sides when
    /// on the plane), and every edge whose endpoints lie strictly on opposite
    /// sides contributes its intersection point to both lists. Both pieces
    /// keep the source winding and plane.
    ///
    /// Non-spanning input returns [`Split::Whole`]: `Front` for `InFront`,
    /// `Back` for `Behind`, `OnPlane` for `Coincident`.
    pub fn split(&self, plane: &Plane) -> Result<Split, GeometryError> {
        match self.relation_with_plane(plane) {
            Relation::Coincident => return Ok(Split::Whole(PlaneSide::OnPlane)),
            Relation::InFront => return Ok(Split::Whole(PlaneSide::Front)),
            Relation::Behind => return Ok(Split::Whole(PlaneSide::Back)),
            Relation::Split => {}
        }

        let vertices = self.vertices();
        let n = vertices.len();

        let mut positive = Vec::with_capacity(n + 2);
        let mut negative = Vec::with_capacity(n + 2);

        // Measure every vertex against the plane's anchor up front
        let distances: Vec<Scalar> = vertices.iter().map(|v| plane.signed_distance(v)).collect();

        for i in 0..n {
            let current = vertices[i];
            let next_idx = (i + 1) % n;
            let current_sign = distances[i].sign();
            let next_sign = distances[next_idx].sign();

            match current_sign {
                Sign::Positive => positive.push(current),
                Sign::Negative => negative.push(current),
                Sign::Zero => {
                    positive.push(current);
                    negative.push(current);
                }
            }

            let crosses = matches!(
                (current_sign, next_sign),
                (Sign::Positive, Sign::Negative) | (Sign::Negative, Sign::Positive)
            );

            if crosses {
                let direction = vertices[next_idx] - current;
                let (_, intersection) = plane.intersect_line(&current, &direction)?;
                positive.push(intersection);
                negative.push(intersection);
            }
        }

        let side = match (self.piece(positive), self.piece(negative)) {
            (Some(positive), Some(negative)) => {
                trace!(
                    "split {}-gon into {} + {} vertices",
                    n,
                    positive.len(),
                    negative.len()
                );
                return Ok(Split::Pieces { positive, negative });
            }
            (Some(_), None) => PlaneSide::Front,
            (None, Some(_)) => PlaneSide::Back,
            (None, None) => dominant_side(&distances),
        };
        warn!("degenerate split of {n}-gon, keeping it whole on the {side:?} side");
        Ok(Split::Whole(side))
    }

    /// Turns a vertex list into a fragment on this polygon's plane, or `None`
    /// if it has collapsed.
    fn piece(&self, vertices: Vec<Point>) -> Option<Polygon> {
        let vertices = dedup_cyclic(vertices);
        if vertices.len() < 3 || derive_plane(&vertices).is_err() {
            return None;
        }
        Some(Polygon::fragment(vertices, self.plane().clone()))
    }
}

/// Drops consecutive (and wrap-around) vertices that coincide within epsilon.
fn dedup_cyclic(mut vertices: Vec<Point>) -> Vec<Point> {
    vertices.dedup_by(|b, a| points_coincide(a, b));
    while vertices.len() > 1 && points_coincide(&vertices[0], &vertices[vertices.len() - 1]) {
        vertices.pop();
    }
    vertices
}

/// The side the polygon reaches furthest into. Ties go to the front.
fn dominant_side(distances: &[Scalar]) -> PlaneSide {
    let reach = |pick: fn(Scalar) -> Scalar| {
        distances
            .iter()
            .map(|d| pick(*d).value())
            .fold(0.0, f64::max)
    };
    if reach(|d| d) >= reach(|d| -d) {
        PlaneSide::Front
    } else {
        PlaneSide::Back
    }
}
