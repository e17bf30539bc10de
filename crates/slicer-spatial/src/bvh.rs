//! Bounding Volume Hierarchy over z-sorted triangles.
//!
//! The working set is sorted by centroid z before the tree is built, so
//! every split partitions the triangles along the query axis and the
//! split-quality score correlates with future plane-query cost.

use smallvec::SmallVec;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use slicer_geometry::{Aabb3, Triangle};

use crate::error::SpatialError;
use crate::index::SpatialIndex;

/// Maximum number of triangles stored in one leaf.
pub const MAX_PRIMS_PER_LEAF: usize = 8;

const TRAVERSAL_COST: f32 = 1.0;
const INTERSECTION_COST: f32 = 2.0;

/// How an internal node chooses where to split its z-sorted triangles.
///
/// The strategy affects build time and query throughput, never query
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplitStrategy {
    /// Split the sorted range at its midpoint.
    MedianSplit,
    /// Score every balanced split by predicted traversal cost and take the
    /// cheapest (ties go to the lowest index).
    #[default]
    SurfaceAreaHeuristic,
}

/// A triangle with the metadata the build needs, cached once.
struct BvhTriangle {
    triangle: Triangle,
    centroid_z: f32,
    bbox: Aabb3,
}

enum BvhNode {
    Internal {
        bbox: Aabb3,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
    Leaf {
        triangles: SmallVec<[Triangle; MAX_PRIMS_PER_LEAF]>,
    },
}

/// A bounding volume hierarchy queryable by horizontal plane.
///
/// Build once, query many times; the tree is read-only after
/// [`build`](SpatialIndex::build) and concurrent queries are safe.
///
/// # Example
///
/// ```
/// use slicer_geometry::{cube_triangles, Point3};
/// use slicer_spatial::{Bvh, SpatialIndex, SplitStrategy};
///
/// let mut bvh = Bvh::new(SplitStrategy::MedianSplit);
/// bvh.build(cube_triangles(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 2.0, 2.0),
/// ))
/// .unwrap();
///
/// assert_eq!(bvh.query(1.0).unwrap().len(), 8);
/// assert_eq!(bvh.aabb().unwrap().max.z, 2.0);
/// ```
#[derive(Default)]
pub struct Bvh {
    strategy: SplitStrategy,
    root: Option<BvhNode>,
}

impl Bvh {
    /// Create an unbuilt hierarchy with the given split strategy.
    #[must_use]
    pub const fn new(strategy: SplitStrategy) -> Self {
        Self {
            strategy,
            root: None,
        }
    }

    /// The strategy this hierarchy splits with.
    #[must_use]
    pub const fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Number of nodes in the built tree, counting leaves.
    ///
    /// Returns 0 before `build`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, count_nodes)
    }
}

impl SpatialIndex for Bvh {
    /// Sort the triangles by centroid z and build the tree.
    ///
    /// # Errors
    ///
    /// [`SpatialError::TooFewPrimitives`] when the input would fit into a
    /// single leaf (fewer than [`MAX_PRIMS_PER_LEAF`] + 1 triangles); the
    /// root must always branch. Callers can fall back to a
    /// [`LinearIndex`](crate::LinearIndex).
    fn build(&mut self, triangles: Vec<Triangle>) -> Result<(), SpatialError> {
        if triangles.len() <= MAX_PRIMS_PER_LEAF {
            return Err(SpatialError::TooFewPrimitives {
                count: triangles.len(),
                minimum: MAX_PRIMS_PER_LEAF + 1,
            });
        }

        let mut working: Vec<BvhTriangle> = triangles
            .into_iter()
            .map(|triangle| BvhTriangle {
                centroid_z: triangle.centroid().z,
                bbox: triangle.aabb(),
                triangle,
            })
            .collect();
        working.sort_by(|a, b| a.centroid_z.total_cmp(&b.centroid_z));

        let root = build_node(&working, self.strategy);
        self.root = Some(root);

        debug!(
            triangles = working.len(),
            nodes = self.node_count(),
            strategy = ?self.strategy,
            "Built BVH"
        );
        Ok(())
    }

    fn query(&self, z: f32) -> Result<Vec<Triangle>, SpatialError> {
        let root = self.root.as_ref().ok_or(SpatialError::Uninitialized)?;
        let mut result = Vec::new();
        collect_straddling(root, z, &mut result);
        Ok(result)
    }

    fn aabb(&self) -> Result<Aabb3, SpatialError> {
        let root = self.root.as_ref().ok_or(SpatialError::Uninitialized)?;
        Ok(match root {
            BvhNode::Internal { bbox, .. } => *bbox,
            // A leaf never ends up at the root, but its bounds are still
            // well-defined.
            BvhNode::Leaf { triangles } => {
                let mut bbox = Aabb3::empty();
                for t in triangles {
                    bbox.extend(&t.aabb());
                }
                bbox
            }
        })
    }
}

fn bounds_of(triangles: &[BvhTriangle]) -> Aabb3 {
    let mut bbox = Aabb3::empty();
    for t in triangles {
        bbox.extend(&t.bbox);
    }
    bbox
}

/// Every split index that leaves at least `min_per_side` triangles on each
/// side, in ascending order. Empty when no such split exists.
fn balanced_split_points(count: usize, min_per_side: usize) -> std::ops::RangeInclusive<usize> {
    if count < min_per_side * 2 {
        #[allow(clippy::reversed_empty_ranges)]
        return 1..=0;
    }
    min_per_side..=(count - min_per_side)
}

#[allow(clippy::cast_precision_loss)] // Triangle counts stay far below 2^24
fn sah_cost(left: &[BvhTriangle], right: &[BvhTriangle], parent_area: f32) -> f32 {
    let left_cost = bounds_of(left).area() / parent_area * left.len() as f32;
    let right_cost = bounds_of(right).area() / parent_area * right.len() as f32;
    INTERSECTION_COST.mul_add(left_cost + right_cost, TRAVERSAL_COST)
}

fn best_sah_split(triangles: &[BvhTriangle]) -> usize {
    let parent_area = bounds_of(triangles).area();
    if parent_area <= 0.0 {
        // Flat parent volume; the cost ratios degenerate, so fall back to
        // the midpoint.
        return triangles.len() / 2;
    }

    let mut best_index = triangles.len() / 2;
    let mut best_cost = f32::INFINITY;
    for i in balanced_split_points(triangles.len(), MAX_PRIMS_PER_LEAF) {
        let (left, right) = triangles.split_at(i);
        let cost = sah_cost(left, right, parent_area);
        if cost < best_cost {
            best_cost = cost;
            best_index = i;
        }
    }
    best_index
}

fn build_node(triangles: &[BvhTriangle], strategy: SplitStrategy) -> BvhNode {
    if triangles.len() <= MAX_PRIMS_PER_LEAF {
        return BvhNode::Leaf {
            triangles: triangles.iter().map(|t| t.triangle).collect(),
        };
    }

    // Below two leaves' worth neither side can reach a balanced split, so
    // the midpoint is the only reasonable candidate.
    let split = if triangles.len() < MAX_PRIMS_PER_LEAF * 2 {
        triangles.len() / 2
    } else {
        match strategy {
            SplitStrategy::MedianSplit => triangles.len() / 2,
            SplitStrategy::SurfaceAreaHeuristic => best_sah_split(triangles),
        }
    };

    let (left_slice, right_slice) = triangles.split_at(split);
    let left = build_node(left_slice, strategy);
    let right = build_node(right_slice, strategy);

    let mut bbox = bounds_of(left_slice);
    bbox.extend(&bounds_of(right_slice));

    BvhNode::Internal {
        bbox,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn collect_straddling(node: &BvhNode, z: f32, out: &mut Vec<Triangle>) {
    match node {
        BvhNode::Leaf { triangles } => {
            for t in triangles {
                if t.aabb().straddles_z(z) {
                    out.push(*t);
                }
            }
        }
        BvhNode::Internal { bbox, left, right } => {
            if bbox.straddles_z(z) {
                collect_straddling(left, z, out);
                collect_straddling(right, z, out);
            }
        }
    }
}

fn count_nodes(node: &BvhNode) -> usize {
    match node {
        BvhNode::Leaf { .. } => 1,
        BvhNode::Internal { left, right, .. } => 1 + count_nodes(left) + count_nodes(right),
    }
}
