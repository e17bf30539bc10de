//! Spatial indexes for plane queries over triangle soups.
//!
//! The slicing workload is one query per horizontal plane: "give me every
//! triangle whose bounding box straddles `z = Z`". This crate provides:
//!
//! - [`SpatialIndex`] - the build/query/aabb seam the slice pipeline
//!   dispatches through
//! - [`LinearIndex`] - the no-index baseline that scans every triangle
//! - [`Bvh`] - a bounding volume hierarchy over z-sorted triangles, with a
//!   choice of [`SplitStrategy`]
//!
//! The two index kinds must return the same *set* of triangles for every
//! query height; only build time and query throughput differ.
//!
//! # Example
//!
//! ```
//! use slicer_geometry::{cube_triangles, Point3};
//! use slicer_spatial::{Bvh, SpatialIndex, SplitStrategy};
//!
//! let triangles = cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
//!
//! let mut bvh = Bvh::new(SplitStrategy::SurfaceAreaHeuristic);
//! bvh.build(triangles).unwrap();
//!
//! let crossing = bvh.query(0.5).unwrap();
//! assert_eq!(crossing.len(), 8); // the four side faces
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bvh;
mod error;
mod index;

pub use bvh::{Bvh, SplitStrategy, MAX_PRIMS_PER_LEAF};
pub use error::SpatialError;
pub use index::{LinearIndex, SpatialIndex};
