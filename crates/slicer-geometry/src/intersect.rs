//! Intersection of segments and triangles with the horizontal plane `z = Z`.
//!
//! The triangle case policy lives in [`triangle_plane`]: every triangle that
//! genuinely crosses the plane produces exactly one segment, and triangles
//! that merely rest against the plane from below produce nothing, so an edge
//! lying on the plane is never counted twice.

// Segments parallel to the plane are detected by exact comparison; an
// epsilon there would reintroduce the double-counting the case table
// exists to prevent.
#![allow(clippy::float_cmp)]

use hashbrown::HashSet;
use nalgebra::{Point2, Point3};

use crate::error::{GeometryError, GeometryResult};
use crate::quantize::{QuantizedPoint2, QuantizedSegment2};
use crate::ray::Ray3;
use crate::segment::Segment3;
use crate::triangle::Triangle;

/// Position of a vertex relative to the plane `z = Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Strictly below the plane (outside the classification band).
    Below,
    /// On the plane, within the classification band.
    On,
    /// Strictly above the plane (outside the classification band).
    Above,
}

/// Classify a vertex height against the plane `z = Z`.
///
/// A vertex is `On` when `|vz - z| <= epsilon`; an epsilon of zero gives
/// exact comparison.
///
/// # Example
///
/// ```
/// use slicer_geometry::{classify_vertex, PlaneSide};
///
/// assert_eq!(classify_vertex(1.0, 1.0, 0.0), PlaneSide::On);
/// assert_eq!(classify_vertex(0.9, 1.0, 0.0), PlaneSide::Below);
/// assert_eq!(classify_vertex(1.00005, 1.0, 1e-4), PlaneSide::On);
/// ```
#[inline]
#[must_use]
pub fn classify_vertex(vz: f32, z: f32, epsilon: f32) -> PlaneSide {
    if (vz - z).abs() <= epsilon {
        PlaneSide::On
    } else if vz < z {
        PlaneSide::Below
    } else {
        PlaneSide::Above
    }
}

/// Intersect a 3D segment with the plane `z = Z`.
///
/// Returns `None` for segments parallel to the plane (including segments
/// lying in it) and for segments whose supporting line crosses the plane
/// outside the `[v0, v1]` range. Endpoints exactly on the plane are returned.
///
/// # Example
///
/// ```
/// use slicer_geometry::{Point3, Segment3, segment_plane};
///
/// let seg = Segment3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 2.0));
/// let hit = segment_plane(&seg, 1.0).unwrap();
/// assert!((hit.x - 1.0).abs() < 1e-6);
///
/// let flat = Segment3::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0));
/// assert!(segment_plane(&flat, 1.0).is_none());
/// ```
#[must_use]
pub fn segment_plane(segment: &Segment3, z: f32) -> Option<Point3<f32>> {
    // Parametric form X(t) = origin + t * direction; substituting into the
    // plane equation leaves only the z components.
    let ray = Ray3::from_points(segment.v0, segment.v1);
    if ray.direction.z == 0.0 {
        return None;
    }

    let t = (z - ray.origin.z) / ray.direction.z;
    if (0.0..=1.0).contains(&t) {
        Some(ray.at(t))
    } else {
        None
    }
}

/// One triangle vertex set, bucketed by plane side.
struct ClassifiedTriangle {
    points: [Point3<f32>; 3],
    below: [usize; 3],
    on: [usize; 3],
    above: [usize; 3],
    n_below: usize,
    n_on: usize,
    n_above: usize,
}

impl ClassifiedTriangle {
    fn classify(triangle: &Triangle, z: f32, epsilon: f32) -> Self {
        let mut result = Self {
            points: triangle.vertices(),
            below: [0; 3],
            on: [0; 3],
            above: [0; 3],
            n_below: 0,
            n_on: 0,
            n_above: 0,
        };

        for (i, point) in result.points.iter().enumerate() {
            match classify_vertex(point.z, z, epsilon) {
                PlaneSide::Below => {
                    result.below[result.n_below] = i;
                    result.n_below += 1;
                }
                PlaneSide::On => {
                    result.on[result.n_on] = i;
                    result.n_on += 1;
                }
                PlaneSide::Above => {
                    result.above[result.n_above] = i;
                    result.n_above += 1;
                }
            }
        }

        result
    }

    fn point_below(&self, i: usize) -> Point3<f32> {
        self.points[self.below[i]]
    }

    fn point_on(&self, i: usize) -> Point3<f32> {
        self.points[self.on[i]]
    }

    fn point_above(&self, i: usize) -> Point3<f32> {
        self.points[self.above[i]]
    }
}

fn straddle_intersection(
    lower: Point3<f32>,
    upper: Point3<f32>,
    z: f32,
) -> GeometryResult<Point3<f32>> {
    segment_plane(&Segment3::new(lower, upper), z).ok_or(GeometryError::DegenerateIntersection {
        v0: lower,
        v1: upper,
        z,
    })
}

/// Intersect a triangle with the plane `z = Z`.
///
/// Vertices are classified as below / on / above (see [`classify_vertex`]);
/// the (on, below, above) counts select the result:
///
/// - all three on one side, or all three on the plane: no segment;
/// - two on and one **below**: no segment (the triangle rests against the
///   plane from below; its edge belongs to the neighbor whose interior
///   crosses the plane);
/// - two on and one above: the segment between the two on-vertices;
/// - one on, one below, one above: the segment from the on-vertex to the
///   below↔above edge intersection;
/// - one vertex on one side and two on the other: the segment between the
///   two straddling edge intersections.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateIntersection`] if a straddling edge
/// required by the classification fails to intersect the plane. That state
/// is unreachable for finite inputs.
pub fn triangle_plane(
    triangle: &Triangle,
    z: f32,
    classification_epsilon: f32,
) -> GeometryResult<Option<Segment3>> {
    let c = ClassifiedTriangle::classify(triangle, z, classification_epsilon);

    if c.n_on == 3 || c.n_below == 3 || c.n_above == 3 {
        return Ok(None);
    }

    if c.n_on == 2 {
        if c.n_above == 1 {
            return Ok(Some(Segment3::new(c.point_on(0), c.point_on(1))));
        }
        // Two on, one below: below-resting.
        return Ok(None);
    }

    if c.n_on == 1 {
        if c.n_below == 1 && c.n_above == 1 {
            let crossing = straddle_intersection(c.point_below(0), c.point_above(0), z)?;
            return Ok(Some(Segment3::new(c.point_on(0), crossing)));
        }
        // One on, two below or two above: the plane only grazes a vertex.
        return Ok(None);
    }

    if c.n_below == 2 {
        let first = straddle_intersection(c.point_below(0), c.point_above(0), z)?;
        let second = straddle_intersection(c.point_below(1), c.point_above(0), z)?;
        return Ok(Some(Segment3::new(first, second)));
    }

    let first = straddle_intersection(c.point_below(0), c.point_above(0), z)?;
    let second = straddle_intersection(c.point_below(0), c.point_above(1), z)?;
    Ok(Some(Segment3::new(first, second)))
}

/// Intersect every triangle with the plane `z = Z` and collect the resulting
/// segments, deduplicated, as canonical quantized 2D segments.
///
/// The z coordinate is dropped and both endpoints are snapped to the
/// `quantization_epsilon` lattice; an edge shared by two adjacent triangles
/// lying on the plane is stored once.
///
/// # Errors
///
/// Propagates [`GeometryError::DegenerateIntersection`] from
/// [`triangle_plane`].
pub fn plane_segments(
    triangles: &[Triangle],
    z: f32,
    quantization_epsilon: f32,
    classification_epsilon: f32,
) -> GeometryResult<HashSet<QuantizedSegment2>> {
    let mut result = HashSet::new();
    for triangle in triangles {
        if let Some(segment) = triangle_plane(triangle, z, classification_epsilon)? {
            let a = QuantizedPoint2::from_point(
                &Point2::new(segment.v0.x, segment.v0.y),
                quantization_epsilon,
            );
            let b = QuantizedPoint2::from_point(
                &Point2::new(segment.v1.x, segment.v1.y),
                quantization_epsilon,
            );
            result.insert(QuantizedSegment2::new(a, b));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Triangle {
        Triangle::from_arrays(v0, v1, v2)
    }

    #[test]
    fn segment_endpoint_on_plane_is_returned() {
        let seg = Segment3::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 1.0, 3.0));
        let hit = segment_plane(&seg, 1.0).unwrap();
        assert_eq!(hit, Point3::new(0.0, 0.0, 1.0));

        let hit = segment_plane(&seg, 3.0).unwrap();
        assert_eq!(hit, Point3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn segment_outside_range_misses() {
        let seg = Segment3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0));
        assert!(segment_plane(&seg, 2.0).is_none());
        assert!(segment_plane(&seg, -0.5).is_none());
    }

    // The ten (on, below, above) cases, exercised exhaustively.

    #[test]
    fn case_three_on() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        assert_eq!(triangle_plane(&t, 1.0, 0.0).unwrap(), None);
    }

    #[test]
    fn case_three_below() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.5], [0.0, 1.0, 0.2]);
        assert_eq!(triangle_plane(&t, 1.0, 0.0).unwrap(), None);
    }

    #[test]
    fn case_three_above() {
        let t = tri([0.0, 0.0, 2.0], [1.0, 0.0, 3.0], [0.0, 1.0, 2.5]);
        assert_eq!(triangle_plane(&t, 1.0, 0.0).unwrap(), None);
    }

    #[test]
    fn case_two_on_one_below_is_dropped() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 0.0]);
        assert_eq!(triangle_plane(&t, 1.0, 0.0).unwrap(), None);
    }

    #[test]
    fn case_two_on_one_above_keeps_the_on_edge() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 2.0]);
        let seg = triangle_plane(&t, 1.0, 0.0).unwrap().unwrap();
        assert_eq!(seg.v0, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(seg.v1, Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn case_one_on_two_below() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.5]);
        assert_eq!(triangle_plane(&t, 1.0, 0.0).unwrap(), None);
    }

    #[test]
    fn case_one_on_two_above() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]);
        assert_eq!(triangle_plane(&t, 1.0, 0.0).unwrap(), None);
    }

    #[test]
    fn case_one_on_one_below_one_above() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 2.0]);
        let seg = triangle_plane(&t, 1.0, 0.0).unwrap().unwrap();
        // From the on-vertex to the below-above edge crossing at t = 0.5.
        assert_eq!(seg.v0, Point3::new(0.0, 0.0, 1.0));
        assert!((seg.v1.x - 1.0).abs() < 1e-6);
        assert!((seg.v1.y - 0.5).abs() < 1e-6);
        assert!((seg.v1.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn case_two_below_one_above() {
        let t = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 0.0, 2.0]);
        let seg = triangle_plane(&t, 1.0, 0.0).unwrap().unwrap();
        assert!((seg.v0.x - 0.5).abs() < 1e-6);
        assert!((seg.v1.x - 1.5).abs() < 1e-6);
        assert!((seg.v0.z - 1.0).abs() < 1e-6);
        assert!((seg.v1.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn case_one_below_two_above() {
        let t = tri([1.0, 0.0, 0.0], [0.0, 0.0, 2.0], [2.0, 0.0, 2.0]);
        let seg = triangle_plane(&t, 1.0, 0.0).unwrap().unwrap();
        assert!((seg.v0.x - 0.5).abs() < 1e-6);
        assert!((seg.v1.x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn classification_band_widens_on() {
        let t = tri([0.0, 0.0, 1.000_05], [1.0, 0.0, 0.999_95], [0.0, 1.0, 0.0]);
        // Exact comparison sees above/below/below: a sliver segment.
        assert!(triangle_plane(&t, 1.0, 0.0).unwrap().is_some());
        // A 1e-4 band sees on/on/below: the triangle is below-resting.
        assert_eq!(triangle_plane(&t, 1.0, 1e-4).unwrap(), None);
    }

    #[test]
    fn shared_on_plane_edge_is_stored_once() {
        // Two coplanar-edge triangles above the plane sharing the edge
        // (0,0,1)-(1,0,1).
        let left = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 2.0]);
        let right = tri([1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [1.0, -1.0, 2.0]);
        let segments = plane_segments(&[left, right], 1.0, 1e-4, 0.0).unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn plane_segments_drops_non_crossing_triangles() {
        let crossing = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 0.0, 2.0]);
        let distant = tri([0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 6.0]);
        let segments = plane_segments(&[crossing, distant], 1.0, 1e-4, 0.0).unwrap();
        assert_eq!(segments.len(), 1);
    }
}
