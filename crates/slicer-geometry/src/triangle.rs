//! Triangle type for geometric calculations.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb3;

/// A triangle with concrete vertex positions.
///
/// Stores the actual vertex positions rather than indices into a shared
/// vertex table. Winding order is not relied upon by the slicing pipeline;
/// cross-section orientation is recovered from the containment hierarchy.
///
/// # Example
///
/// ```
/// use slicer_geometry::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 2.0),
/// );
///
/// let c = tri.centroid();
/// assert!((c.z - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f32>,
    /// Second vertex.
    pub v1: Point3<f32>,
    /// Third vertex.
    pub v2: Point3<f32>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::Triangle;
    ///
    /// let tri = Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    /// );
    /// assert_eq!(tri.v1.x, 1.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_arrays(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        Self {
            v0: Point3::new(v0[0], v0[1], v0[2]),
            v1: Point3::new(v1[0], v1[1], v1[2]),
            v2: Point3::new(v2[0], v2[1], v2[2]),
        }
    }

    /// Get vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f32>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Compute the centroid (average of the three vertices).
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f32> {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }

    /// Get the three edges as (start, end) pairs.
    ///
    /// Returns edges in order: v0→v1, v1→v2, v2→v0.
    #[must_use]
    pub const fn edges(&self) -> [(Point3<f32>, Point3<f32>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Compute the axis-aligned bounding box of the triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::{Point3, Triangle};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.5, 1.0, 0.5),
    /// );
    /// let aabb = tri.aabb();
    /// assert_eq!(aabb.max.z, 0.5);
    /// ```
    #[must_use]
    pub fn aabb(&self) -> Aabb3 {
        let mut aabb = Aabb3::empty();
        aabb.extend_point(&self.v0);
        aabb.extend_point(&self.v1);
        aabb.extend_point(&self.v2);
        aabb
    }
}
