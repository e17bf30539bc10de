//! Manifold adjacency assembly for cross-section segments.
//!
//! A closed, manifold mesh produces exactly two incident segments at every
//! cross-section vertex: one arriving, one leaving around the loop. The
//! assembler enforces that invariant and anything else is reported as a
//! defect of the source mesh.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use slicer_geometry::{QuantizedPoint2, QuantizedSegment2};

use crate::error::{SliceError, SliceResult};

/// A 2-regular vertex adjacency: every vertex maps to exactly two
/// neighbors.
///
/// Produced by [`build_adjacency`]; consumed by the outline walker.
#[derive(Debug, Default, Clone)]
pub struct ManifoldAdjacency {
    map: HashMap<QuantizedPoint2, [QuantizedPoint2; 2]>,
}

impl ManifoldAdjacency {
    /// The two neighbors of a vertex, if it is part of the cross-section.
    #[must_use]
    pub fn neighbors(&self, vertex: &QuantizedPoint2) -> Option<&[QuantizedPoint2; 2]> {
        self.map.get(vertex)
    }

    /// Number of vertices in the cross-section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cross-section is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over the vertices.
    pub fn vertices(&self) -> impl Iterator<Item = &QuantizedPoint2> {
        self.map.keys()
    }
}

fn push_neighbor(
    slots: &mut [Option<QuantizedPoint2>; 2],
    vertex: QuantizedPoint2,
    neighbor: QuantizedPoint2,
) -> SliceResult<()> {
    if slots[0].is_none() {
        slots[0] = Some(neighbor);
        Ok(())
    } else if slots[1].is_none() {
        slots[1] = Some(neighbor);
        Ok(())
    } else {
        Err(SliceError::NonManifoldVertex { vertex })
    }
}

/// Assemble segments into a 2-regular vertex adjacency.
///
/// Segments whose endpoints collapsed to the same lattice vertex are
/// discarded. Every remaining vertex must end up with exactly two
/// neighbors.
///
/// # Errors
///
/// - [`SliceError::NonManifoldVertex`] as soon as a third segment meets a
///   vertex.
/// - [`SliceError::DanglingVertex`] if a vertex has fewer than two
///   neighbors after all segments are consumed.
///
/// # Example
///
/// ```
/// use hashbrown::HashSet;
/// use slicer_core::build_adjacency;
/// use slicer_geometry::{QuantizedPoint2, QuantizedSegment2};
///
/// let corners = [(0, 0), (1, 0), (1, 1), (0, 1)];
/// let segments: HashSet<_> = (0..4)
///     .map(|i| {
///         let (ax, ay) = corners[i];
///         let (bx, by) = corners[(i + 1) % 4];
///         QuantizedSegment2::new(
///             QuantizedPoint2::new(ax, ay),
///             QuantizedPoint2::new(bx, by),
///         )
///     })
///     .collect();
///
/// let adjacency = build_adjacency(&segments).unwrap();
/// assert_eq!(adjacency.len(), 4);
/// ```
pub fn build_adjacency(segments: &HashSet<QuantizedSegment2>) -> SliceResult<ManifoldAdjacency> {
    let mut working: HashMap<QuantizedPoint2, [Option<QuantizedPoint2>; 2]> = HashMap::new();

    for segment in segments {
        if segment.is_degenerate() {
            debug!(
                qx = segment.v0.qx,
                qy = segment.v0.qy,
                "Discarding segment shorter than the quantization lattice"
            );
            continue;
        }

        push_neighbor(
            working.entry(segment.v0).or_default(),
            segment.v0,
            segment.v1,
        )?;
        push_neighbor(
            working.entry(segment.v1).or_default(),
            segment.v1,
            segment.v0,
        )?;
    }

    let mut map = HashMap::with_capacity(working.len());
    for (vertex, slots) in working {
        match slots {
            [Some(a), Some(b)] => {
                map.insert(vertex, [a, b]);
            }
            [Some(_), None] => {
                return Err(SliceError::DanglingVertex { vertex, count: 1 });
            }
            _ => {
                return Err(SliceError::DanglingVertex { vertex, count: 0 });
            }
        }
    }

    Ok(ManifoldAdjacency { map })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    fn seg(a: (i64, i64), b: (i64, i64)) -> QuantizedSegment2 {
        QuantizedSegment2::new(
            QuantizedPoint2::new(a.0, a.1),
            QuantizedPoint2::new(b.0, b.1),
        )
    }

    fn square_loop() -> HashSet<QuantizedSegment2> {
        [
            seg((0, 0), (1, 0)),
            seg((1, 0), (1, 1)),
            seg((1, 1), (0, 1)),
            seg((0, 1), (0, 0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn closed_loop_is_two_regular() {
        let adjacency = build_adjacency(&square_loop()).unwrap();
        assert_eq!(adjacency.len(), 4);
        for vertex in adjacency.vertices() {
            let neighbors = adjacency.neighbors(vertex).unwrap();
            assert_ne!(neighbors[0], neighbors[1]);
        }
    }

    #[test]
    fn three_segments_at_one_vertex_fail() {
        // A Y shape meeting at the origin.
        let segments: HashSet<_> = [
            seg((0, 0), (1, 0)),
            seg((0, 0), (0, 1)),
            seg((0, 0), (-1, -1)),
        ]
        .into_iter()
        .collect();

        let err = build_adjacency(&segments).unwrap_err();
        assert!(matches!(
            err,
            SliceError::NonManifoldVertex {
                vertex: QuantizedPoint2 { qx: 0, qy: 0 }
            }
        ));
    }

    #[test]
    fn open_chain_fails_with_dangling_endpoint() {
        let segments: HashSet<_> = [seg((0, 0), (1, 0)), seg((1, 0), (2, 0))]
            .into_iter()
            .collect();

        let err = build_adjacency(&segments).unwrap_err();
        assert!(matches!(
            err,
            SliceError::DanglingVertex { count: 1, .. }
        ));
    }

    #[test]
    fn degenerate_segments_are_discarded() {
        let mut segments = square_loop();
        segments.insert(seg((5, 5), (5, 5)));

        let adjacency = build_adjacency(&segments).unwrap();
        assert_eq!(adjacency.len(), 4);
        assert!(adjacency
            .neighbors(&QuantizedPoint2::new(5, 5))
            .is_none());
    }

    #[test]
    fn empty_input_gives_empty_adjacency() {
        let adjacency = build_adjacency(&HashSet::new()).unwrap();
        assert!(adjacency.is_empty());
    }
}
