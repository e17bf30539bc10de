//! Ray types.

use nalgebra::{Point2, Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D ray: an origin and an unbounded direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray2 {
    /// Ray origin.
    pub origin: Point2<f32>,
    /// Ray direction; not necessarily normalized.
    pub direction: Vector2<f32>,
}

impl Ray2 {
    /// Create a ray from an origin and a direction.
    #[inline]
    #[must_use]
    pub const fn new(origin: Point2<f32>, direction: Vector2<f32>) -> Self {
        Self { origin, direction }
    }

    /// Create the ray from `p0` through `p1`.
    #[inline]
    #[must_use]
    pub fn from_points(p0: Point2<f32>, p1: Point2<f32>) -> Self {
        Self {
            origin: p0,
            direction: p1 - p0,
        }
    }
}

/// A 3D ray: an origin and an unbounded direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray3 {
    /// Ray origin.
    pub origin: Point3<f32>,
    /// Ray direction; not necessarily normalized.
    pub direction: Vector3<f32>,
}

impl Ray3 {
    /// Create a ray from an origin and a direction.
    #[inline]
    #[must_use]
    pub const fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Create the ray from `p0` through `p1`.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::{Point3, Ray3};
    ///
    /// let ray = Ray3::from_points(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(0.0, 0.0, 2.0),
    /// );
    /// assert_eq!(ray.direction.z, 2.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_points(p0: Point3<f32>, p1: Point3<f32>) -> Self {
        Self {
            origin: p0,
            direction: p1 - p0,
        }
    }

    /// The point at parameter `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}
