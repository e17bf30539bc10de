//! Simple triangulated shapes for tests, examples, and benchmarks.

use nalgebra::Point3;

use crate::triangle::Triangle;

/// Build the 12-triangle soup of an axis-aligned box.
///
/// Faces are wound counter-clockwise when viewed from outside, though the
/// slicing pipeline does not depend on winding.
///
/// # Example
///
/// ```
/// use slicer_geometry::{cube_triangles, Point3};
///
/// let tris = cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
/// assert_eq!(tris.len(), 12);
/// ```
#[must_use]
pub fn cube_triangles(min: Point3<f32>, max: Point3<f32>) -> Vec<Triangle> {
    let corners = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    let faces: [[usize; 3]; 12] = [
        // Bottom
        [0, 2, 1],
        [0, 3, 2],
        // Top
        [4, 5, 6],
        [4, 6, 7],
        // Front
        [0, 1, 5],
        [0, 5, 4],
        // Back
        [2, 3, 7],
        [2, 7, 6],
        // Left
        [0, 4, 7],
        [0, 7, 3],
        // Right
        [1, 2, 6],
        [1, 6, 5],
    ];

    faces
        .iter()
        .map(|&[a, b, c]| Triangle::new(corners[a], corners[b], corners[c]))
        .collect()
}

/// Build a unit cube spanning `[0, 1]` on every axis.
///
/// # Example
///
/// ```
/// use slicer_geometry::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.len(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> Vec<Triangle> {
    cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Aabb3;

    #[test]
    fn cube_bounds_match_corners() {
        let tris = cube_triangles(Point3::new(-1.0, 0.0, 2.0), Point3::new(1.0, 3.0, 5.0));
        let mut aabb = Aabb3::empty();
        for t in &tris {
            aabb.extend(&t.aabb());
        }
        assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 2.0));
        assert_eq!(aabb.max, Point3::new(1.0, 3.0, 5.0));
    }

    #[test]
    fn unit_cube_spans_origin_to_one() {
        let tris = unit_cube();
        assert_eq!(tris.len(), 12);
        let mut aabb = Aabb3::empty();
        for t in &tris {
            aabb.extend(&t.aabb());
        }
        assert_eq!(aabb.min, Point3::origin());
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
    }
}
