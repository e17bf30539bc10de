//! Containment hierarchy and winding assignment for slice outlines.
//!
//! Outlines come out of the walker with arbitrary orientation. Sorting them
//! by bounding-box area and nesting by point containment recovers which
//! outline is a shell and which is a hole: depth alternates shell / hole /
//! shell down the tree, and each outline is re-oriented to match its role.

use slicer_geometry::{Aabb2, Point2, Polygon2, Ray2, Vector2};

use crate::outline::OutlineWithWinding;

/// Emission orientation required by an outline's role in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winding {
    /// Positive signed area; shells.
    CounterClockwise,
    /// Negative signed area; holes.
    Clockwise,
}

fn determinant(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ax * by - bx * ay
}

/// Does a horizontal ray cross the segment `(v0, v1)`?
///
/// The segment is treated as half-open in y: a crossing through a shared
/// vertex counts once, and a ray grazing along a collinear edge counts zero
/// or two, never one. Outlines subdivided by collinear vertices therefore
/// report the same parity as their un-subdivided shape.
fn ray_crosses_segment(ray: &Ray2, v0: &Point2<f32>, v1: &Point2<f32>) -> bool {
    let py = ray.origin.y;
    if (v0.y > py) == (v1.y > py) {
        // Both endpoints on the same side (or the segment is horizontal).
        return false;
    }

    let s = v1 - v0;
    let c = v0 - ray.origin;
    let rxs = determinant(ray.direction.x, ray.direction.y, s.x, s.y);
    let t = determinant(c.x, c.y, s.x, s.y) / rxs;
    t >= 0.0
}

/// Check if a point lies inside a closed outline.
///
/// Casts a ray from the point in the +x direction and counts edge
/// crossings: odd means inside.
///
/// # Example
///
/// ```
/// use slicer_core::is_inside;
/// use slicer_geometry::Point2;
///
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
/// ];
/// assert!(is_inside(&Point2::new(5.0, 5.0), &square));
/// assert!(!is_inside(&Point2::new(15.0, 5.0), &square));
/// ```
#[must_use]
pub fn is_inside(point: &Point2<f32>, outline: &[Point2<f32>]) -> bool {
    let ray = Ray2::new(*point, Vector2::new(1.0, 0.0));
    let mut crossings = 0usize;
    for (i, v0) in outline.iter().enumerate() {
        let v1 = &outline[(i + 1) % outline.len()];
        if ray_crosses_segment(&ray, v0, v1) {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

/// Containment is all-or-nothing because outlines never cross, so testing a
/// single vertex of the candidate suffices.
fn outline_is_inside(maybe_inner: &[Point2<f32>], outer: &[Point2<f32>]) -> bool {
    maybe_inner
        .first()
        .is_some_and(|point| is_inside(point, outer))
}

/// One node of the containment forest: an index into the area-sorted
/// outline array, or the root sentinel.
#[derive(Debug, Default)]
struct HierarchyNode {
    /// `None` only for the root sentinel.
    index: Option<usize>,
    children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn with_index(index: usize) -> Self {
        Self {
            index: Some(index),
            children: Vec::new(),
        }
    }

    /// Attach outline `i` below the smallest outline containing it; the
    /// root sentinel accepts everything.
    fn insert(&mut self, i: usize, sorted: &[OutlineWithWinding]) -> bool {
        let accepts = match self.index {
            None => true,
            Some(own) => outline_is_inside(&sorted[i].outline, &sorted[own].outline),
        };
        if !accepts {
            return false;
        }

        for child in &mut self.children {
            if child.insert(i, sorted) {
                return true;
            }
        }
        self.children.push(Self::with_index(i));
        true
    }
}

/// The containment forest over one slice's outlines.
///
/// Built by inserting outlines in ascending bounding-box-area order, so an
/// outline can never arrive before one that contains it has a chance to: a
/// container always has the larger box.
#[derive(Debug)]
pub struct OutlineHierarchy {
    sorted: Vec<OutlineWithWinding>,
    root: HierarchyNode,
}

impl OutlineHierarchy {
    /// Sort the outlines and build the containment forest.
    #[must_use]
    pub fn new(mut outlines: Vec<OutlineWithWinding>) -> Self {
        outlines.sort_by(|a, b| {
            let area_a = Aabb2::from_points(a.outline.iter()).area();
            let area_b = Aabb2::from_points(b.outline.iter()).area();
            area_a.total_cmp(&area_b)
        });

        // Largest outline first: a container must be in the tree before its
        // contents arrive, since candidates only descend into nodes that
        // contain them.
        let mut root = HierarchyNode::default();
        for i in (0..outlines.len()).rev() {
            root.insert(i, &outlines);
        }

        Self {
            sorted: outlines,
            root,
        }
    }

    /// Emit the forest as polygons with holes, in depth-first order.
    ///
    /// Depth-1 outlines become shells (counter-clockwise), their children
    /// become holes (clockwise), and deeper outlines alternate: an island
    /// inside a hole is a new top-level shell.
    #[must_use]
    pub fn polygons(&self) -> Vec<Polygon2> {
        let mut result = Vec::new();
        for child in &self.root.children {
            self.write_polygon(child, &mut result);
        }
        result
    }

    fn oriented(&self, index: usize, target: Winding) -> Vec<Point2<f32>> {
        let outline = &self.sorted[index];
        let needs_reverse = match target {
            Winding::CounterClockwise => outline.signed_area < 0.0,
            Winding::Clockwise => outline.signed_area > 0.0,
        };

        let mut vertices = outline.outline.clone();
        if needs_reverse {
            vertices.reverse();
        }
        vertices
    }

    fn write_polygon(&self, node: &HierarchyNode, destination: &mut Vec<Polygon2>) {
        let Some(index) = node.index else {
            return;
        };

        let mut polygon = Polygon2::new(self.oriented(index, Winding::CounterClockwise));
        let mut nested = Vec::new();
        for child in &node.children {
            self.write_hole(child, &mut polygon, &mut nested);
        }

        destination.push(polygon);
        destination.append(&mut nested);
    }

    fn write_hole(
        &self,
        node: &HierarchyNode,
        parent: &mut Polygon2,
        destination: &mut Vec<Polygon2>,
    ) {
        let Some(index) = node.index else {
            return;
        };

        parent
            .holes
            .push(Polygon2::new(self.oriented(index, Winding::Clockwise)));
        for child in &node.children {
            self.write_polygon(child, destination);
        }
    }
}
