//! Random polygons scattered through an axis-aligned box.
//!
//! Every polygon starts from an anchor vertex at a random position and a
//! random orientation. The remaining vertices are offset from the anchor
//! inside that plane, and their convex hull becomes the polygon.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use bsp_partition::{GeometryError, LineSegment, Point, Polygon, Real, Vector, VectorExt};
use log::debug;
use nalgebra::Vector2;
use rand::Rng;

use crate::{ConfigError, SceneConfig};

/// Direction drawn uniformly from the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector {
    let theta = rng.random_range(0.0..TAU);
    let phi = rng.random_range(-1.0..=1.0f64).acos();
    Vector::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Point drawn uniformly from the cube `[min, max]^3`.
pub fn random_point_in_box<R: Rng + ?Sized>(rng: &mut R, min: Real, max: Real) -> Point {
    Point::new(
        rng.random_range(min..=max),
        rng.random_range(min..=max),
        rng.random_range(min..=max),
    )
}

/// Segment between two independent random points of the scene box.
pub fn random_segment<R: Rng + ?Sized>(rng: &mut R, config: &SceneConfig) -> LineSegment {
    LineSegment::new(
        random_point_in_box(rng, config.min, config.max),
        random_point_in_box(rng, config.min, config.max),
    )
}

/// Two unit vectors spanning the plane orthogonal to `normal`, ordered so
/// that `u × w` points along `normal`.
pub fn orthonormal_basis(normal: &Vector) -> Result<(Vector, Vector), GeometryError> {
    let u = if normal.x.abs() > normal.z.abs() {
        Vector::new(normal.y, -normal.x, 0.0)
    } else {
        Vector::new(0.0, -normal.z, normal.y)
    };
    let w = normal.cross(&u);
    Ok((u.to_unit()?, w.to_unit()?))
}

/// Generates one random convex polygon.
///
/// Fails with [`GeometryError::DegeneratePolygon`] or
/// [`GeometryError::TooFewVertices`] when the drawn offsets collapse onto a
/// line or a point.
pub fn random_polygon<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SceneConfig,
) -> Result<Polygon, GeometryError> {
    let anchor = random_point_in_box(rng, config.min, config.max);
    let normal = random_unit_vector(rng);
    let (u, w) = orthonormal_basis(&normal)?;

    let mut offsets = Vec::with_capacity(config.extra_vertices + 1);
    offsets.push(Vector2::zeros());
    for _ in 0..config.extra_vertices {
        offsets.push(Vector2::new(
            rng.random_range(-config.extent..=config.extent),
            rng.random_range(-config.extent..=config.extent),
        ));
    }

    let vertices = convex_hull(offsets)
        .into_iter()
        .map(|c| anchor + u * c.x + w * c.y)
        .collect();
    Polygon::new(vertices)
}

/// Generates `config.polygons` random polygons, redrawing degenerate ones.
pub fn random_polygons<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SceneConfig,
) -> Result<Vec<Polygon>, ConfigError> {
    config.validate()?;

    let mut polygons = Vec::with_capacity(config.polygons);
    while polygons.len() < config.polygons {
        match random_polygon(rng, config) {
            Ok(polygon) => polygons.push(polygon),
            Err(err) => debug!("redrawing polygon {}: {err}", polygons.len()),
        }
    }
    Ok(polygons)
}

/// Andrew's monotone chain, counter-clockwise with collinear points dropped.
fn convex_hull(mut points: Vec<Vector2<Real>>) -> Vec<Vector2<Real>> {
    points.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        o => o,
    });
    points.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if points.len() < 3 {
        return points;
    }

    let mut lower: Vec<Vector2<Real>> = Vec::with_capacity(points.len());
    for p in &points {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<Real>> = Vec::with_capacity(points.len());
    for p in points.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[inline]
fn turn(a: Vector2<Real>, b: Vector2<Real>, c: Vector2<Real>) -> Real {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
