//! Hand-built polygon sets: cubes, floors and the demo scene.

use bsp_partition::{GeometryError, Plane, Point, Polygon, Real, Vector};
use nalgebra::{Rotation3, Unit};
use rand::Rng;

/// Corner offsets of a unit-centred cube scaled to half-size `h`.
fn corner_offsets(h: Real) -> [Vector; 8] {
    [
        Vector::new(-h, -h, -h), // 0: left-bottom-back
        Vector::new(h, -h, -h),  // 1: right-bottom-back
        Vector::new(h, h, -h),   // 2: right-top-back
        Vector::new(-h, h, -h),  // 3: left-top-back
        Vector::new(-h, -h, h),  // 4: left-bottom-front
        Vector::new(h, -h, h),   // 5: right-bottom-front
        Vector::new(h, h, h),    // 6: right-top-front
        Vector::new(-h, h, h),   // 7: left-top-front
    ]
}

/// Counter-clockwise when viewed from outside, so normals face outwards.
const FACES: [[usize; 4]; 6] = [
    [4, 5, 6, 7], // +Z
    [1, 0, 3, 2], // -Z
    [0, 4, 7, 3], // -X
    [5, 1, 2, 6], // +X
    [7, 6, 2, 3], // +Y
    [0, 1, 5, 4], // -Y
];

/// The six faces of an axis-aligned cube.
pub fn cube(center: Point, size: Real) -> Result<Vec<Polygon>, GeometryError> {
    let corners = corner_offsets(size / 2.0).map(|offset| center + offset);
    FACES
        .iter()
        .map(|[a, b, c, d]| Polygon::new(vec![corners[*a], corners[*b], corners[*c], corners[*d]]))
        .collect()
}

/// The six faces of a cube rotated about its center.
pub fn rotated_cube(
    center: Point,
    size: Real,
    rotation: &Rotation3<Real>,
) -> Result<Vec<Polygon>, GeometryError> {
    let corners = corner_offsets(size / 2.0).map(|offset| center + rotation * offset);
    FACES
        .iter()
        .map(|[a, b, c, d]| coplanar_quad(corners[*a], corners[*b], corners[*c], corners[*d]))
        .collect()
}

/// Builds a quad, projecting the last corner onto the plane of the first
/// three to absorb rounding from the rotation.
fn coplanar_quad(p0: Point, p1: Point, p2: Point, p3: Point) -> Result<Polygon, GeometryError> {
    let plane = Plane::from_points(p0, p1, p2)?;
    let p3 = plane.project_point(&p3)?;
    Polygon::new(vec![p0, p1, p2, p3])
}

/// Square floor at height `y`, facing up.
pub fn floor(y: Real, half_size: Real) -> Result<Polygon, GeometryError> {
    let h = half_size;
    Polygon::new(vec![
        Point::new(-h, y, h),
        Point::new(h, y, h),
        Point::new(h, y, -h),
        Point::new(-h, y, -h),
    ])
}

/// A rotated cube and an axis-aligned cube standing above a floor.
pub fn demo_scene() -> Result<Vec<Polygon>, GeometryError> {
    let rot_x = Rotation3::from_axis_angle(&Vector::x_axis(), 0.3);
    let rot_y = Rotation3::from_axis_angle(&Vector::y_axis(), 0.4);
    let rot_z = Rotation3::from_axis_angle(&Vector::z_axis(), 0.25);

    let mut polygons = rotated_cube(Point::new(-1.0, 0.0, 0.0), 0.8, &(rot_z * rot_y * rot_x))?;
    polygons.extend(cube(Point::new(1.0, 0.0, 0.0), 0.8)?);
    polygons.push(floor(-1.0, 1.5)?);
    Ok(polygons)
}

/// `count` randomly placed and rotated cubes inside `[-world/2, world/2]^3`.
pub fn random_rotated_cubes<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    world: Real,
    sizes: (Real, Real),
) -> Result<Vec<Polygon>, GeometryError> {
    let half = world / 2.0;
    let mut polygons = Vec::with_capacity(count * FACES.len());

    for _ in 0..count {
        let center = Point::new(
            rng.random_range(-half..=half),
            rng.random_range(-half..=half),
            rng.random_range(-half..=half),
        );
        let size = rng.random_range(sizes.0..=sizes.1);

        let axis = Vector::new(
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
        );
        let axis = Unit::try_new(axis, 0.01).unwrap_or_else(Vector::x_axis);
        let angle = rng.random_range(0.0..std::f64::consts::TAU);

        polygons.extend(rotated_cube(center, size, &Rotation3::from_axis_angle(&axis, angle))?);
    }

    Ok(polygons)
}
