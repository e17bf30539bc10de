//! The slice pipeline: plane queries stitched into polygons per height.

use rayon::prelude::*;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use slicer_geometry::{plane_segments, Aabb3, Polygon2};
use slicer_spatial::SpatialIndex;

use crate::adjacency::build_adjacency;
use crate::error::SliceResult;
use crate::hierarchy::OutlineHierarchy;
use crate::outline::{walk_outlines, OutlineWithWinding};
use crate::params::SliceParams;

/// One horizontal cross-section of the mesh.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slice {
    /// Closed polygons with holes; shells counter-clockwise, holes
    /// clockwise, in forest depth-first order.
    pub polygons: Vec<Polygon2>,
    /// Height of the slice plane.
    pub z: f32,
}

/// The slice heights for a volume: `min.z`, stepping by `thickness`, up to
/// but never including `max.z`.
///
/// The top of the mesh is not a slice; its cross-section would be a line or
/// nothing. Returns no heights for an empty volume or a non-positive
/// thickness.
///
/// # Example
///
/// ```
/// use slicer_core::slice_heights;
/// use slicer_geometry::{Aabb3, Point3};
///
/// let volume = Aabb3::from_points(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 1.0),
/// ]);
/// assert_eq!(slice_heights(&volume, 0.5), vec![0.0, 0.5]);
/// ```
#[must_use]
pub fn slice_heights(volume: &Aabb3, thickness: f32) -> Vec<f32> {
    let mut result = Vec::new();
    if thickness <= 0.0 || !thickness.is_finite() || volume.min.z >= volume.max.z {
        return result;
    }

    // Index multiplication instead of accumulation keeps the heights from
    // drifting across many layers.
    let mut layer = 0u32;
    loop {
        #[allow(clippy::cast_precision_loss)]
        let z = (layer as f32).mul_add(thickness, volume.min.z);
        if z >= volume.max.z {
            break;
        }
        result.push(z);
        layer += 1;
    }
    result
}

/// Slice the indexed mesh into layers, bottom to top.
///
/// For each height the index is queried for candidate triangles, their
/// plane intersections are assembled into a manifold adjacency, the
/// adjacency is walked into closed outlines, and the outlines are nested
/// into polygons with holes.
///
/// # Errors
///
/// Propagates parameter validation, spatial index, intersection, and
/// manifold errors. A single bad triangle fails the whole slice; nothing is
/// retried internally.
///
/// # Example
///
/// ```
/// use slicer_core::{slice, SliceParams};
/// use slicer_geometry::unit_cube;
/// use slicer_spatial::{Bvh, SpatialIndex, SplitStrategy};
///
/// let mut index = Bvh::new(SplitStrategy::SurfaceAreaHeuristic);
/// index.build(unit_cube()).unwrap();
///
/// let slices = slice(&index, &SliceParams::default().with_thickness(0.5)).unwrap();
/// assert_eq!(slices.len(), 2);
/// assert_eq!(slices[0].polygons.len(), 1);
/// ```
pub fn slice(index: &dyn SpatialIndex, params: &SliceParams) -> SliceResult<Vec<Slice>> {
    params.validate()?;
    let volume = index.aabb()?;
    let heights = slice_heights(&volume, params.thickness);

    info!(
        layers = heights.len(),
        thickness = params.thickness,
        "Slicing mesh"
    );

    heights
        .iter()
        .map(|&z| generate_slice(index, z, params))
        .collect()
}

/// Slice every layer in parallel.
///
/// Each height is an independent pure function of the read-only index, so
/// layers fan out across the thread pool; the result is still ordered by
/// ascending z.
///
/// # Errors
///
/// Same as [`slice`].
pub fn slice_parallel(
    index: &(dyn SpatialIndex + Sync),
    params: &SliceParams,
) -> SliceResult<Vec<Slice>> {
    params.validate()?;
    let volume = index.aabb()?;
    let heights = slice_heights(&volume, params.thickness);

    info!(
        layers = heights.len(),
        thickness = params.thickness,
        "Slicing mesh across the thread pool"
    );

    heights
        .par_iter()
        .map(|&z| generate_slice(index, z, params))
        .collect()
}

/// Compute the single cross-section at `z` without deriving heights from
/// the volume.
///
/// # Errors
///
/// Same as [`slice`].
pub fn slice_at(index: &dyn SpatialIndex, z: f32, params: &SliceParams) -> SliceResult<Slice> {
    params.validate()?;
    generate_slice(index, z, params)
}

fn generate_slice(index: &dyn SpatialIndex, z: f32, params: &SliceParams) -> SliceResult<Slice> {
    let triangles = index.query(z)?;
    let segments = plane_segments(
        &triangles,
        z,
        params.quantization_epsilon,
        params.classification_epsilon,
    )?;
    let adjacency = build_adjacency(&segments)?;
    let outlines = walk_outlines(&adjacency, params.quantization_epsilon);

    let annotated: Vec<OutlineWithWinding> =
        outlines.into_iter().map(OutlineWithWinding::new).collect();
    let polygons = OutlineHierarchy::new(annotated).polygons();

    debug!(
        z,
        candidates = triangles.len(),
        polygons = polygons.len(),
        "Generated slice"
    );
    Ok(Slice { polygons, z })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicer_geometry::{cube_triangles, unit_cube, Point3};
    use slicer_spatial::{Bvh, LinearIndex, SplitStrategy};

    #[test]
    fn heights_stop_below_the_top() {
        let volume = Aabb3::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ]);
        assert_eq!(slice_heights(&volume, 0.5), vec![0.0, 0.5]);
        assert_eq!(slice_heights(&volume, 0.4), vec![0.0, 0.4, 0.8]);
        assert_eq!(slice_heights(&volume, 2.0), vec![0.0]);
    }

    #[test]
    fn heights_of_empty_volume_are_empty() {
        assert!(slice_heights(&Aabb3::empty(), 0.5).is_empty());
    }

    #[test]
    fn heights_reject_non_positive_thickness() {
        let volume = Aabb3::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ]);
        assert!(slice_heights(&volume, 0.0).is_empty());
        assert!(slice_heights(&volume, -1.0).is_empty());
    }

    #[test]
    fn unit_cube_slices_into_squares() {
        let mut index = Bvh::new(SplitStrategy::MedianSplit);
        index.build(unit_cube()).unwrap();

        let slices = slice(&index, &SliceParams::default().with_thickness(0.5)).unwrap();
        assert_eq!(slices.len(), 2);

        for s in &slices {
            assert_eq!(s.polygons.len(), 1);
            assert!(s.polygons[0].holes.is_empty());
            let area = crate::outline::signed_area(&s.polygons[0].vertices);
            assert!((area - 1.0).abs() < 1e-3, "area {area} at z = {}", s.z);
        }
    }

    /// Rotate a polygon (and its holes) to start at the lexicographically
    /// smallest vertex, so cyclic sequences compare independent of the walk
    /// start.
    fn canonicalize(polygon: &Polygon2) -> Polygon2 {
        let mut result = polygon.clone();
        if let Some(start) = (0..result.vertices.len()).min_by(|&a, &b| {
            let (va, vb) = (&result.vertices[a], &result.vertices[b]);
            va.x.total_cmp(&vb.x).then(va.y.total_cmp(&vb.y))
        }) {
            result.vertices.rotate_left(start);
        }
        result.holes = result.holes.iter().map(canonicalize).collect();
        result
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut index = Bvh::new(SplitStrategy::SurfaceAreaHeuristic);
        index
            .build(cube_triangles(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 4.0),
            ))
            .unwrap();

        let params = SliceParams::default().with_thickness(0.3);
        let sequential = slice(&index, &params).unwrap();
        let parallel = slice_parallel(&index, &params).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.z, b.z);
            assert_eq!(a.polygons.len(), b.polygons.len());
            for (pa, pb) in a.polygons.iter().zip(&b.polygons) {
                assert_eq!(canonicalize(pa), canonicalize(pb), "diverged at z = {}", a.z);
            }
        }
    }

    #[test]
    fn slice_at_works_with_the_linear_fallback() {
        let mut index = LinearIndex::new();
        index.build(unit_cube()).unwrap();

        let s = slice_at(&index, 0.25, &SliceParams::default()).unwrap();
        assert_eq!(s.polygons.len(), 1);
        assert!((s.z - 0.25).abs() < 1e-6);
    }

    #[test]
    fn invalid_params_fail_before_any_work() {
        let index = LinearIndex::new();
        // Validation runs before the uninitialized index is touched.
        let err = slice(&index, &SliceParams::default().with_thickness(0.0)).unwrap_err();
        assert!(matches!(err, crate::error::SliceError::InvalidThickness(_)));
    }
}
