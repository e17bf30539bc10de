//! Convex polygon clipping against a horizontal plane.

// On-boundary decisions are exact float comparisons on purpose; vertices
// emitted on the plane carry z == Z bit-for-bit.
#![allow(clippy::float_cmp)]

use nalgebra::Point3;

use crate::error::{GeometryError, GeometryResult};
use crate::intersect::segment_plane;
use crate::polygon::Polygon3;
use crate::segment::Segment3;

/// Which half-space of the plane `z = Z` to keep when clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepRegion {
    /// Keep geometry with `z >= Z`.
    Above,
    /// Keep geometry with `z <= Z`.
    Below,
}

/// How one directed polygon edge relates to the keep region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineBehavior {
    /// Both endpoints inside, boundary included.
    RemainsIn,
    /// Starts inside (boundary included), ends outside.
    Exits,
    /// Starts outside, ends strictly inside.
    Enters,
    /// Both endpoints outside or on the boundary coming from outside.
    RemainsOut,
}

fn inside_inclusive(p: &Point3<f32>, z: f32, keep: KeepRegion) -> bool {
    match keep {
        KeepRegion::Above => p.z >= z,
        KeepRegion::Below => p.z <= z,
    }
}

fn inside_exclusive(p: &Point3<f32>, z: f32, keep: KeepRegion) -> bool {
    match keep {
        KeepRegion::Above => p.z > z,
        KeepRegion::Below => p.z < z,
    }
}

fn line_behavior(p0: &Point3<f32>, p1: &Point3<f32>, z: f32, keep: KeepRegion) -> LineBehavior {
    if inside_inclusive(p0, z, keep) {
        if inside_inclusive(p1, z, keep) {
            LineBehavior::RemainsIn
        } else {
            LineBehavior::Exits
        }
    } else if inside_exclusive(p1, z, keep) {
        LineBehavior::Enters
    } else {
        LineBehavior::RemainsOut
    }
}

/// A polygon resting entirely in the keep region needs no clipping; for
/// `Below` an all-on-plane polygon is considered out of region, so a flat
/// face at the shared boundary of two slabs registers once, with the slab
/// above it.
fn all_points_in_region(vertices: &[Point3<f32>], z: f32, keep: KeepRegion) -> bool {
    match keep {
        KeepRegion::Above => vertices.iter().all(|v| v.z >= z),
        KeepRegion::Below => {
            if vertices.iter().all(|v| v.z == z) {
                return false;
            }
            vertices.iter().all(|v| v.z <= z)
        }
    }
}

/// The emitted polygon must begin strictly inside the keep region so the
/// edge walk never opens on the boundary.
fn starting_index(vertices: &[Point3<f32>], z: f32, keep: KeepRegion) -> Option<usize> {
    vertices.iter().position(|v| inside_exclusive(v, z, keep))
}

/// Clip a convex polygon by the plane `z = Z`, keeping one half-space.
///
/// The input winding order is preserved and the output vertex order matches
/// the input modulo a rotation. A polygon entirely inside the keep region is
/// returned verbatim; a polygon entirely outside yields an empty polygon.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidPolygon`] for inputs with fewer than
/// three vertices, and [`GeometryError::DegenerateIntersection`] if a
/// crossing edge fails to produce an intersection point (unreachable for
/// finite inputs).
///
/// # Example
///
/// ```
/// use slicer_geometry::{clip, KeepRegion, Point3, Polygon3};
///
/// let tri = Polygon3::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 2.0),
/// ]);
///
/// let top = clip(&tri, 1.0, KeepRegion::Above).unwrap();
/// assert_eq!(top.vertices.len(), 3);
///
/// let bottom = clip(&tri, 1.0, KeepRegion::Below).unwrap();
/// assert_eq!(bottom.vertices.len(), 4);
/// ```
pub fn clip(polygon: &Polygon3, z: f32, keep: KeepRegion) -> GeometryResult<Polygon3> {
    if !polygon.is_valid() {
        return Err(GeometryError::InvalidPolygon {
            count: polygon.vertices.len(),
        });
    }

    if all_points_in_region(&polygon.vertices, z, keep) {
        return Ok(polygon.clone());
    }

    let Some(offset) = starting_index(&polygon.vertices, z, keep) else {
        // No geometry in region.
        return Ok(Polygon3::default());
    };

    let count = polygon.vertices.len();
    let mut result = Polygon3::default();

    for i in 0..count {
        let p0 = polygon.vertices[(i + offset) % count];
        let p1 = polygon.vertices[(i + offset + 1) % count];

        match line_behavior(&p0, &p1, z, keep) {
            LineBehavior::RemainsIn => {
                result.vertices.push(p0);
            }
            LineBehavior::Exits => {
                result.vertices.push(p0);
                if p0.z != z {
                    // When p0 sits on the plane it already is the exit point.
                    let crossing = segment_plane(&Segment3::new(p0, p1), z).ok_or(
                        GeometryError::DegenerateIntersection { v0: p0, v1: p1, z },
                    )?;
                    result.vertices.push(crossing);
                }
            }
            LineBehavior::Enters => {
                let crossing = segment_plane(&Segment3::new(p0, p1), z).ok_or(
                    GeometryError::DegenerateIntersection { v0: p0, v1: p1, z },
                )?;
                result.vertices.push(crossing);
            }
            LineBehavior::RemainsOut => {}
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z_values: [f32; 4]) -> Polygon3 {
        Polygon3::new(vec![
            Point3::new(0.0, 0.0, z_values[0]),
            Point3::new(1.0, 0.0, z_values[1]),
            Point3::new(1.0, 1.0, z_values[2]),
            Point3::new(0.0, 1.0, z_values[3]),
        ])
    }

    /// Compare vertex sequences modulo a starting-vertex rotation.
    fn is_rotation_of(actual: &[Point3<f32>], expected: &[Point3<f32>]) -> bool {
        if actual.len() != expected.len() {
            return false;
        }
        let n = actual.len();
        (0..n).any(|shift| {
            (0..n).all(|i| {
                let d = actual[(i + shift) % n] - expected[i];
                d.norm() < 1e-5
            })
        })
    }

    #[test]
    fn invalid_polygon_is_rejected() {
        let degenerate = Polygon3::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        let result = clip(&degenerate, 0.5, KeepRegion::Above);
        assert!(matches!(
            result,
            Err(GeometryError::InvalidPolygon { count: 2 })
        ));
    }

    #[test]
    fn clip_at_bottom_keeps_everything_above() {
        let poly = square([0.0, 0.0, 2.0, 2.0]);
        let clipped = clip(&poly, 0.0, KeepRegion::Above).unwrap();
        assert_eq!(clipped, poly);
    }

    #[test]
    fn clip_at_top_keeps_everything_below() {
        let poly = square([0.0, 0.0, 2.0, 2.0]);
        let clipped = clip(&poly, 2.0, KeepRegion::Below).unwrap();
        assert_eq!(clipped, poly);

        let above = clip(&poly, 2.0, KeepRegion::Above).unwrap();
        assert!(above.is_empty());
    }

    #[test]
    fn flat_polygon_belongs_to_the_region_above() {
        let flat = square([1.0, 1.0, 1.0, 1.0]);
        let above = clip(&flat, 1.0, KeepRegion::Above).unwrap();
        assert_eq!(above, flat);

        let below = clip(&flat, 1.0, KeepRegion::Below).unwrap();
        assert!(below.is_empty());
    }

    #[test]
    fn pointing_down_triangle_keep_above() {
        let tri = Polygon3::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
        ]);
        let clipped = clip(&tri, 0.5, KeepRegion::Above).unwrap();
        let expected = [
            Point3::new(0.25, 0.0, 0.5),
            Point3::new(0.75, 0.0, 0.5),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        assert!(is_rotation_of(&clipped.vertices, &expected));
    }

    #[test]
    fn crossing_square_splits_in_half() {
        let poly = square([0.0, 0.0, 2.0, 2.0]);

        let top = clip(&poly, 1.0, KeepRegion::Above).unwrap();
        let expected_top = [
            Point3::new(1.0, 0.5, 1.0),
            Point3::new(1.0, 1.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
            Point3::new(0.0, 0.5, 1.0),
        ];
        assert!(is_rotation_of(&top.vertices, &expected_top));

        let bottom = clip(&poly, 1.0, KeepRegion::Below).unwrap();
        let expected_bottom = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.5, 1.0),
            Point3::new(0.0, 0.5, 1.0),
        ];
        assert!(is_rotation_of(&bottom.vertices, &expected_bottom));
    }

    #[test]
    fn vertex_on_plane_is_not_duplicated() {
        // One vertex exactly on the clipping plane, exiting through it.
        let tri = Polygon3::new(vec![
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        let clipped = clip(&tri, 1.0, KeepRegion::Above).unwrap();
        let expected = [
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        // The on-plane vertex appears exactly once.
        assert!(is_rotation_of(&clipped.vertices, &expected));
    }

    #[test]
    fn reversed_input_gives_reversed_output() {
        let poly = square([0.0, 0.0, 2.0, 2.0]);
        let mut reversed = poly.clone();
        reversed.vertices.reverse();

        let clipped = clip(&poly, 1.0, KeepRegion::Above).unwrap();
        let clipped_reversed = clip(&reversed, 1.0, KeepRegion::Above).unwrap();

        let mut expected = clipped.vertices.clone();
        expected.reverse();
        assert!(is_rotation_of(&clipped_reversed.vertices, &expected));
    }

    #[test]
    fn rotated_start_vertex_gives_same_output() {
        let poly = square([0.0, 0.0, 2.0, 2.0]);
        let clipped = clip(&poly, 1.0, KeepRegion::Above).unwrap();

        for shift in 1..poly.vertices.len() {
            let mut rotated = poly.clone();
            rotated.vertices.rotate_left(shift);
            let clipped_rotated = clip(&rotated, 1.0, KeepRegion::Above).unwrap();
            assert!(is_rotation_of(&clipped_rotated.vertices, &clipped.vertices));
        }
    }
}
