//! Line segment types.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A directed 2D line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment2 {
    /// Start point.
    pub v0: Point2<f32>,
    /// End point.
    pub v1: Point2<f32>,
}

impl Segment2 {
    /// Create a new segment from two points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point2<f32>, v1: Point2<f32>) -> Self {
        Self { v0, v1 }
    }
}

/// A directed 3D line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment3 {
    /// Start point.
    pub v0: Point3<f32>,
    /// End point.
    pub v1: Point3<f32>,
}

impl Segment3 {
    /// Create a new segment from two points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f32>, v1: Point3<f32>) -> Self {
        Self { v0, v1 }
    }

    /// Project the segment onto the XY plane by dropping the z coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::{Point3, Segment3};
    ///
    /// let seg = Segment3::new(Point3::new(1.0, 2.0, 5.0), Point3::new(3.0, 4.0, 5.0));
    /// let flat = seg.to_2d();
    /// assert_eq!(flat.v0.x, 1.0);
    /// assert_eq!(flat.v1.y, 4.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_2d(&self) -> Segment2 {
        Segment2::new(
            Point2::new(self.v0.x, self.v0.y),
            Point2::new(self.v1.x, self.v1.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_to_2d_drops_z() {
        let seg = Segment3::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));
        let flat = seg.to_2d();
        assert_eq!(flat.v0, Point2::new(1.0, 2.0));
        assert_eq!(flat.v1, Point2::new(4.0, 5.0));
    }
}
