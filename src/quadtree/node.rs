use std::fmt::Debug;

use tracing::trace;

use crate::quadtree::aabb::Aabb;
use crate::quadtree::aabb::Quadrant;
use crate::quadtree::point::Point;

/// Children of a node. A node is either a leaf, or it has all four of its children.
enum NodeState {
    Leaf,

    /// Indexed by [`Quadrant::index`]: upper-right, upper-left, lower-left, lower-right.
    Subdivided(Box<[Node; 4]>),
}

pub struct Node {
    bounds: Aabb,

    /// Distance from the root, which is at depth `0`
    depth: u8,

    value: f32,

    state: NodeState,
}

impl Node {
    pub(crate) fn new(bounds: Aabb, value: f32, depth: u8) -> Self {
        Node {
            bounds,
            depth,
            value,
            state: NodeState::Leaf,
        }
    }

    /// Lower-left corner of the node
    pub fn position(&self) -> Point {
        self.bounds.min()
    }

    pub fn size(&self) -> f32 {
        self.bounds.size()
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf)
    }

    /// Nodes only ever know their own depth, so the root is whichever node sits at depth `0`.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    pub fn children(&self) -> Option<&[Node; 4]> {
        match &self.state {
            NodeState::Leaf => None,
            NodeState::Subdivided(children) => Some(&**children),
        }
    }

    /// Return the children of this node, creating them first if this node is still a leaf.
    ///
    /// New children hold `0` and sit one level deeper than `self`.
    fn subdivide(&mut self) -> &mut [Node; 4] {
        if self.is_leaf() {
            let depth = self.depth + 1;
            let children = self.bounds.split().map(|b| Node::new(b, 0.0, depth));

            trace!(depth = self.depth, at = ?self.position(), "subdividing");
            self.state = NodeState::Subdivided(Box::new(children));
        }

        match &mut self.state {
            NodeState::Subdivided(children) => &mut **children,
            NodeState::Leaf => unreachable!(),
        }
    }

    /// Write `value` at the leaf that covers `p`, subdividing along the way.
    pub(crate) fn set_value(&mut self, p: Point, value: f32, max_depth: u8) {
        // reached leaf
        if self.depth >= max_depth {
            self.value = value;
            return;
        }

        let q = Quadrant::of(self.center(), p);
        self.subdivide()[q.index()].set_value(p, value, max_depth);
    }

    pub(crate) fn get_value(&self, p: Point, max_depth: u8) -> f32 {
        match &self.state {
            NodeState::Subdivided(children) if self.depth < max_depth => {
                let q = Quadrant::of(self.center(), p);
                children[q.index()].get_value(p, max_depth)
            }
            _ => self.value,
        }
    }

    /// Write `value` on every max-depth node whose square passes the clamp-distance test against
    /// the circle. Unlike [`Node::set_value`], this descends into all four children.
    pub(crate) fn set_value_circle(&mut self, value: f32, center: Point, radius: f32, max_depth: u8) {
        if !self.bounds.touches_circle(center, radius) {
            return;
        }

        if self.depth >= max_depth {
            self.value = value;
            return;
        }

        for child in self.subdivide().iter_mut() {
            child.set_value_circle(value, center, radius, max_depth);
        }
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {:?} size={} value={}",
            self.depth,
            self.position(),
            self.size(),
            self.value
        )
    }
}
