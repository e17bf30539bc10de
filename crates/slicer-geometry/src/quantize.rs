//! Fixed-point quantization of 2D points.
//!
//! Floating-point endpoints produced by independent triangle/plane
//! intersections rarely compare equal bit-for-bit. Snapping them to an
//! integer lattice of spacing ε makes equality, hashing, and ordering exact,
//! so endpoints within ε of each other collapse to one shared vertex.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point snapped to an integer lattice.
///
/// `qx = round(x / ε)`, `qy = round(y / ε)` with round-half-away-from-zero
/// ties. Equality, hashing, and the lexicographic `Ord` are defined on the
/// integer pair.
///
/// # Example
///
/// ```
/// use slicer_geometry::{Point2, QuantizedPoint2};
///
/// let eps = 1e-4;
/// let a = QuantizedPoint2::from_point(&Point2::new(1.00001, 2.0), eps);
/// let b = QuantizedPoint2::from_point(&Point2::new(1.00003, 2.0), eps);
/// assert_eq!(a, b);
///
/// let p = a.to_point(eps);
/// assert!((p.x - 1.0).abs() < eps);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuantizedPoint2 {
    /// Lattice x coordinate.
    pub qx: i64,
    /// Lattice y coordinate.
    pub qy: i64,
}

impl QuantizedPoint2 {
    /// Create a quantized point directly from lattice coordinates.
    #[inline]
    #[must_use]
    pub const fn new(qx: i64, qy: i64) -> Self {
        Self { qx, qy }
    }

    /// Snap a floating-point 2D point to the lattice of spacing `epsilon`.
    #[inline]
    #[must_use]
    pub fn from_point(point: &Point2<f32>, epsilon: f32) -> Self {
        Self {
            qx: quantize_scalar(point.x, epsilon),
            qy: quantize_scalar(point.y, epsilon),
        }
    }

    /// Map the lattice point back to floating-point coordinates.
    ///
    /// The result is within ε/2 of the original point in each coordinate.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Lattice coordinates stay far below 2^52 in practice
    pub fn to_point(&self, epsilon: f32) -> Point2<f32> {
        Point2::new(self.qx as f32 * epsilon, self.qy as f32 * epsilon)
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)] // Finite inputs divided by a positive epsilon
fn quantize_scalar(v: f32, epsilon: f32) -> i64 {
    (v / epsilon).round() as i64
}

/// A 2D segment with quantized endpoints in canonical order.
///
/// The constructor swaps the endpoints so that the lexicographically smaller
/// one comes first, making the segment direction-agnostic: the two half-edges
/// an interior mesh edge contributes map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuantizedSegment2 {
    /// Lexicographically smaller endpoint.
    pub v0: QuantizedPoint2,
    /// Lexicographically larger endpoint.
    pub v1: QuantizedPoint2,
}

impl QuantizedSegment2 {
    /// Create a canonical segment from two endpoints in either order.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::{QuantizedPoint2, QuantizedSegment2};
    ///
    /// let a = QuantizedPoint2::new(5, 0);
    /// let b = QuantizedPoint2::new(-3, 7);
    /// assert_eq!(
    ///     QuantizedSegment2::new(a, b),
    ///     QuantizedSegment2::new(b, a),
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn new(a: QuantizedPoint2, b: QuantizedPoint2) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// Check if both endpoints collapsed to the same lattice vertex.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.v0 == self.v1
    }
}
