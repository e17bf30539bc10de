//! Axis-aligned bounding boxes.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// A box is *empty* when `max <= min` on every axis, which is the state
/// produced by [`Aabb2::empty`] before any point has been added.
///
/// # Example
///
/// ```
/// use slicer_geometry::{Aabb2, Point2};
///
/// let mut aabb = Aabb2::empty();
/// assert!(aabb.is_empty());
///
/// aabb.extend_point(&Point2::new(1.0, 2.0));
/// aabb.extend_point(&Point2::new(3.0, -1.0));
/// assert_eq!(aabb.min, Point2::new(1.0, -1.0));
/// assert_eq!(aabb.max, Point2::new(3.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2<f32>,
    /// Maximum corner.
    pub max: Point2<f32>,
}

impl Aabb2 {
    /// Create an empty (inverted) bounding box.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f32::MAX, f32::MAX),
            max: Point2::new(f32::MIN, f32::MIN),
        }
    }

    /// Create a bounding box from an iterator of points.
    ///
    /// Returns an empty box for an empty iterator.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2<f32>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.extend_point(point);
        }
        aabb
    }

    /// Check if the box is empty (`max <= min` on every axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x && self.max.y <= self.min.y
    }

    /// Widen the box to include a point.
    pub fn extend_point(&mut self, point: &Point2<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Widen the box to include another box.
    pub fn extend(&mut self, other: &Self) {
        self.extend_point(&other.min);
        self.extend_point(&other.max);
    }

    /// Area of the box (product of the spans).
    #[inline]
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y)
    }
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}

/// A 3D axis-aligned bounding box.
///
/// A box is *empty* when `max <= min` on every axis. [`Aabb3::area`] is the
/// product of the three spans, the volume proxy used as the split-quality
/// measure during spatial index construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb3 {
    /// Create an empty (inverted) bounding box.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Point3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    /// Create a bounding box from an iterator of points.
    ///
    /// Returns an empty box for an empty iterator.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f32>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.extend_point(point);
        }
        aabb
    }

    /// Check if the box is empty (`max <= min` on every axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x && self.max.y <= self.min.y && self.max.z <= self.min.z
    }

    /// Widen the box to include a point.
    pub fn extend_point(&mut self, point: &Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Widen the box to include another box.
    pub fn extend(&mut self, other: &Self) {
        self.extend_point(&other.min);
        self.extend_point(&other.max);
    }

    /// Volume proxy for the box (product of the three spans).
    #[inline]
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y) * (self.max.z - self.min.z)
    }

    /// Check if the horizontal plane `z = Z` passes through the box.
    ///
    /// Touching either face counts as straddling.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::{Aabb3, Point3};
    ///
    /// let aabb = Aabb3::from_points(&[
    ///     Point3::new(0.0, 0.0, 1.0),
    ///     Point3::new(1.0, 1.0, 3.0),
    /// ]);
    /// assert!(aabb.straddles_z(1.0));
    /// assert!(aabb.straddles_z(2.0));
    /// assert!(!aabb.straddles_z(3.5));
    /// ```
    #[inline]
    #[must_use]
    pub fn straddles_z(&self, z: f32) -> bool {
        self.min.z <= z && self.max.z >= z
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::empty()
    }
}
