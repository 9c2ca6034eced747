use core::fmt::Debug;
use std::fmt::Display;

use tracing::debug;
use tracing::warn;

pub use crate::quadtree::aabb::Aabb;
pub use crate::quadtree::aabb::Quadrant;
pub use crate::quadtree::node::Node;
pub use crate::quadtree::point::Point;

use crate::error::TreeError;
use crate::error::TreeResult;

mod aabb;
mod node;
mod point;

/// Deepest tree that may be built. A full tree at this depth has `4^10` leaves.
pub const MAX_DEPTH_LIMIT: u8 = 10;

/// Facts shared by every node of one tree. Set once when the tree is built.
#[derive(Debug, Clone, Copy)]
struct TreeMeta {
    /// Depth at which nodes become permanent leaves
    max_depth: u8,

    /// Square covered by the root
    bounds: Aabb,
}

/// A fixed-depth quadtree over a square region, holding one scalar per node.
///
/// Nodes are subdivided lazily by writes and never merged back together.
pub struct SpatialQuadTree {
    meta: TreeMeta,
    root: Node,
}

impl SpatialQuadTree {
    /// Create a tree whose root is a single leaf covering the square at `position` with side
    /// length `size`, holding `initial_value`.
    pub fn new(position: Point, size: f32, initial_value: f32, max_depth: u8) -> TreeResult<Self> {
        if !position.is_finite() {
            return Err(TreeError::InvalidPosition {
                x: position.x,
                y: position.y,
            });
        }

        if !(size.is_finite() && size > 0.0) {
            return Err(TreeError::InvalidSize { size });
        }

        if !initial_value.is_finite() {
            return Err(TreeError::InvalidValue {
                value: initial_value,
            });
        }

        if max_depth > MAX_DEPTH_LIMIT {
            return Err(TreeError::DepthTooLarge { depth: max_depth });
        }

        let bounds = Aabb::square(position, size);
        debug!(?position, size, initial_value, max_depth, "created tree");

        Ok(Self {
            meta: TreeMeta { max_depth, bounds },
            root: Node::new(bounds, initial_value, 0),
        })
    }

    pub fn max_depth(&self) -> u8 {
        self.meta.max_depth
    }

    pub fn bounds(&self) -> Aabb {
        self.meta.bounds
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Store `value` in the max-depth node covering `p`.
    ///
    /// Points outside the root square are not rejected. They are routed by the same center
    /// comparisons and land in whichever border node those comparisons pick.
    pub fn set_value(&mut self, p: Point, value: f32) {
        self.root.set_value(p, value, self.meta.max_depth);
    }

    /// Read the value of the deepest existing node covering `p`.
    pub fn get_value(&self, p: Point) -> f32 {
        self.root.get_value(p, self.meta.max_depth)
    }

    /// Store `value` in every max-depth node whose square is within `radius` of `center`.
    ///
    /// The test is the squared distance from `center` to the closest point of each square, which
    /// is cheap and errs on the side of writing.
    pub fn set_value_circle(&mut self, value: f32, center: Point, radius: f32) {
        if !(center.is_finite() && radius.is_finite()) {
            warn!(?center, radius, "ignoring circle write with non-finite geometry");
            return;
        }

        self.root
            .set_value_circle(value, center, radius, self.meta.max_depth);
    }

    /// Iterate over every node, parents before children, children in [`Quadrant`] order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();

        for node in self.nodes() {
            stats.nodes += 1;
            stats.deepest = stats.deepest.max(node.depth());

            if node.is_leaf() {
                stats.leaves += 1;

                if node.value() == 1.0 {
                    stats.full_leaves += 1;
                }
            }
        }

        stats
    }
}

impl Debug for SpatialQuadTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialQuadTree")
            .field("meta", &self.meta)
            .field("stats", &self.stats())
            .finish()
    }
}

/// One line per node, indented two spaces per level.
impl Display for SpatialQuadTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for node in self.nodes() {
            let indent = 2 * node.depth() as usize;
            writeln!(f, "{:indent$}{:?}", "", node)?;
        }

        Ok(())
    }
}

/// Depth-first iterator over the nodes of a [`SpatialQuadTree`].
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        if let Some(children) = node.children() {
            // reversed, so that the first quadrant is popped first
            self.stack.extend(children.iter().rev());
        }

        Some(node)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,

    /// Leaves holding exactly `1`
    pub full_leaves: usize,

    /// Depth of the deepest node
    pub deepest: u8,
}
