//! Polygon types.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed 2D polygon with optional holes.
///
/// Vertices describe the boundary in order, without repeating the final
/// vertex; the last vertex connects back to the first by convention. After
/// slicing, outer boundaries are counter-clockwise (positive signed area)
/// and holes are clockwise.
///
/// Holes may recursively carry their own `holes` when an island sits inside
/// a pocket.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon2 {
    /// Boundary vertices, in order, unclosed.
    pub vertices: Vec<Point2<f32>>,
    /// Excluded pockets inside this polygon.
    pub holes: Vec<Polygon2>,
}

impl Polygon2 {
    /// Create a polygon from boundary vertices with no holes.
    #[must_use]
    pub const fn new(vertices: Vec<Point2<f32>>) -> Self {
        Self {
            vertices,
            holes: Vec::new(),
        }
    }

    /// Check if the polygon has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check if the polygon describes an area (at least three vertices).
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() > 2
    }
}

/// A closed, planar-by-convention 3D polygon.
///
/// Used as the input and output of convex clipping. Vertices are unclosed,
/// as in [`Polygon2`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon3 {
    /// Boundary vertices, in order, unclosed.
    pub vertices: Vec<Point3<f32>>,
}

impl Polygon3 {
    /// Create a polygon from boundary vertices.
    #[must_use]
    pub const fn new(vertices: Vec<Point3<f32>>) -> Self {
        Self { vertices }
    }

    /// Check if the polygon has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check if the polygon describes an area (at least three vertices).
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() > 2
    }

    /// Project onto the XY plane by dropping the z coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use slicer_geometry::{Point3, Polygon3};
    ///
    /// let poly = Polygon3::new(vec![
    ///     Point3::new(0.0, 0.0, 2.0),
    ///     Point3::new(1.0, 0.0, 2.0),
    ///     Point3::new(0.0, 1.0, 2.0),
    /// ]);
    /// let flat = poly.to_2d();
    /// assert_eq!(flat.vertices.len(), 3);
    /// assert_eq!(flat.vertices[1].x, 1.0);
    /// ```
    #[must_use]
    pub fn to_2d(&self) -> Polygon2 {
        Polygon2::new(
            self.vertices
                .iter()
                .map(|v| Point2::new(v.x, v.y))
                .collect(),
        )
    }
}
