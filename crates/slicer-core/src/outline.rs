//! Outline extraction from the cross-section adjacency.

use hashbrown::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use slicer_geometry::{Point2, QuantizedPoint2};

use crate::adjacency::ManifoldAdjacency;

/// An ordered, closed-by-convention sequence of cross-section vertices.
///
/// The last vertex connects back to the first; the winding (interior vs
/// exterior) is unknown until the containment hierarchy assigns it.
pub type SliceOutline = Vec<Point2<f32>>;

/// Which way an outline turns, read off the sign of its shoelace area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelativeWinding {
    /// Negative signed area: clockwise in a right-handed frame.
    Negative,
    /// Positive signed area: counter-clockwise in a right-handed frame.
    Positive,
}

/// An outline annotated with its signed area.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutlineWithWinding {
    /// The outline vertices.
    pub outline: SliceOutline,
    /// Shoelace signed area of the outline.
    pub signed_area: f32,
}

impl OutlineWithWinding {
    /// Annotate an outline with its signed area.
    #[must_use]
    pub fn new(outline: SliceOutline) -> Self {
        let signed_area = signed_area(&outline);
        Self {
            outline,
            signed_area,
        }
    }

    /// The winding implied by the signed area.
    #[must_use]
    pub fn winding(&self) -> RelativeWinding {
        if self.signed_area < 0.0 {
            RelativeWinding::Negative
        } else {
            RelativeWinding::Positive
        }
    }
}

/// Shoelace signed area of a closed outline.
///
/// Each edge contributes the signed area of the triangle it forms with the
/// origin; regions swept outside the outline cancel, so the origin does not
/// need to lie inside.
///
/// # Example
///
/// ```
/// use slicer_core::signed_area;
/// use slicer_geometry::Point2;
///
/// let ccw_square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
/// assert!((signed_area(&ccw_square) - 4.0).abs() < 1e-6);
///
/// let cw_square: Vec<_> = ccw_square.into_iter().rev().collect();
/// assert!((signed_area(&cw_square) + 4.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn signed_area(outline: &[Point2<f32>]) -> f32 {
    if outline.is_empty() {
        return 0.0;
    }
    let mut accumulated = 0.0;
    for (i, p0) in outline.iter().enumerate() {
        let p1 = &outline[(i + 1) % outline.len()];
        accumulated += p0.x * p1.y - p1.x * p0.y;
    }
    0.5 * accumulated
}

/// Walk the adjacency into one closed outline per connected component.
///
/// By the 2-regular invariant every component is a simple cycle: starting
/// anywhere and always stepping to the neighbor that is not the previous
/// vertex traverses the whole component exactly once. Vertices are mapped
/// back to floating-point coordinates with `quantization_epsilon`.
///
/// The order of outlines and the start vertex within each outline are
/// unspecified.
#[must_use]
pub fn walk_outlines(
    adjacency: &ManifoldAdjacency,
    quantization_epsilon: f32,
) -> Vec<SliceOutline> {
    let mut unvisited: HashSet<QuantizedPoint2> = adjacency.vertices().copied().collect();

    let mut result = Vec::new();
    while let Some(&start) = unvisited.iter().next() {
        let mut outline = SliceOutline::new();
        let mut previous: Option<QuantizedPoint2> = None;
        let mut current = start;

        loop {
            outline.push(current.to_point(quantization_epsilon));
            unvisited.remove(&current);

            let Some(&[a, b]) = adjacency.neighbors(&current) else {
                // Unreachable for adjacencies built by this crate.
                break;
            };
            let next = if previous == Some(a) { b } else { a };
            previous = Some(current);
            current = next;

            if current == start {
                break;
            }
        }

        result.push(outline);
    }
    result
}
