//! The spatial index seam and the linear-scan baseline.

use slicer_geometry::{Aabb3, Triangle};

use crate::error::SpatialError;

/// A queryable spatial index over a triangle soup.
///
/// `build` consumes the triangles once; after that the index is read-only
/// and concurrent `query` calls are safe. Implementations must agree on
/// query results: every triangle whose bounding box straddles the plane,
/// and no other.
pub trait SpatialIndex {
    /// Construct the index from a triangle soup.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see [`Bvh::build`](crate::Bvh).
    fn build(&mut self, triangles: Vec<Triangle>) -> Result<(), SpatialError>;

    /// Return every triangle whose bounding box straddles the plane `z = Z`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Uninitialized`] if `build` has not been called.
    fn query(&self, z: f32) -> Result<Vec<Triangle>, SpatialError>;

    /// The bounding box of all indexed triangles.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Uninitialized`] if `build` has not been called.
    fn aabb(&self) -> Result<Aabb3, SpatialError>;
}

/// The no-index baseline: a flat list scanned on every query.
///
/// Accepts any number of triangles, including counts a [`Bvh`](crate::Bvh)
/// rejects, which makes it the fallback for very small meshes.
///
/// # Example
///
/// ```
/// use slicer_geometry::{Point3, Triangle};
/// use slicer_spatial::{LinearIndex, SpatialIndex};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(0.0, 1.0, 2.0),
/// );
///
/// let mut index = LinearIndex::default();
/// index.build(vec![tri]).unwrap();
/// assert_eq!(index.query(1.0).unwrap().len(), 1);
/// assert_eq!(index.query(3.0).unwrap().len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct LinearIndex {
    built: Option<(Vec<Triangle>, Aabb3)>,
}

impl LinearIndex {
    /// Create an empty, unbuilt index.
    #[must_use]
    pub const fn new() -> Self {
        Self { built: None }
    }
}

impl SpatialIndex for LinearIndex {
    fn build(&mut self, triangles: Vec<Triangle>) -> Result<(), SpatialError> {
        let mut bounds = Aabb3::empty();
        for triangle in &triangles {
            bounds.extend(&triangle.aabb());
        }
        self.built = Some((triangles, bounds));
        Ok(())
    }

    fn query(&self, z: f32) -> Result<Vec<Triangle>, SpatialError> {
        let (triangles, _) = self.built.as_ref().ok_or(SpatialError::Uninitialized)?;
        Ok(triangles
            .iter()
            .filter(|t| t.aabb().straddles_z(z))
            .copied()
            .collect())
    }

    fn aabb(&self) -> Result<Aabb3, SpatialError> {
        let (_, bounds) = self.built.as_ref().ok_or(SpatialError::Uninitialized)?;
        Ok(*bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicer_geometry::{cube_triangles, Point3};

    #[test]
    fn query_before_build_fails() {
        let index = LinearIndex::new();
        assert_eq!(index.query(0.0), Err(SpatialError::Uninitialized));
        assert_eq!(index.aabb(), Err(SpatialError::Uninitialized));
    }

    #[test]
    fn linear_index_filters_by_z_range() {
        let mut index = LinearIndex::new();
        index
            .build(cube_triangles(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 2.0),
            ))
            .unwrap();

        // Mid-height: the eight side triangles.
        assert_eq!(index.query(1.0).unwrap().len(), 8);
        // At the bottom face every triangle touching z = 0 qualifies.
        assert_eq!(index.query(0.0).unwrap().len(), 10);
        // Outside the volume: nothing.
        assert!(index.query(2.5).unwrap().is_empty());
    }

    #[test]
    fn aabb_covers_all_triangles() {
        let mut index = LinearIndex::new();
        index
            .build(cube_triangles(
                Point3::new(-1.0, -2.0, -3.0),
                Point3::new(1.0, 2.0, 3.0),
            ))
            .unwrap();

        let aabb = index.aabb().unwrap();
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn empty_build_is_allowed() {
        let mut index = LinearIndex::new();
        index.build(Vec::new()).unwrap();
        assert!(index.query(0.0).unwrap().is_empty());
        assert!(index.aabb().unwrap().is_empty());
    }
}
