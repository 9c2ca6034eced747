use tracing::info;

use crate::error::TreeError;
use crate::error::TreeResult;
use crate::quadtree::Point;
use crate::quadtree::SpatialQuadTree;

/// Holds at most one tree at a time.
///
/// The host creates a tree on request, dropping the old one, and every read or write is rejected
/// with [`TreeError::NoTree`] until the first tree exists.
#[derive(Debug, Default)]
pub struct Session {
    tree: Option<SpatialQuadTree>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new tree, replacing the current one outright.
    ///
    /// On error the previous tree is kept.
    pub fn create_tree(
        &mut self,
        origin: Point,
        size: f32,
        initial_value: f32,
        max_depth: u8,
    ) -> TreeResult<&SpatialQuadTree> {
        let tree = SpatialQuadTree::new(origin, size, initial_value, max_depth)?;

        if let Some(old) = &self.tree {
            info!(nodes = old.stats().nodes, "replacing tree");
        }

        Ok(self.tree.insert(tree))
    }

    pub fn tree(&self) -> Option<&SpatialQuadTree> {
        self.tree.as_ref()
    }

    pub fn set_value(&mut self, p: Point, value: f32) -> TreeResult<()> {
        self.tree_mut()?.set_value(p, value);
        Ok(())
    }

    pub fn get_value(&self, p: Point) -> TreeResult<f32> {
        let tree = self.tree.as_ref().ok_or(TreeError::NoTree)?;
        Ok(tree.get_value(p))
    }

    pub fn set_value_circle(&mut self, value: f32, center: Point, radius: f32) -> TreeResult<()> {
        self.tree_mut()?.set_value_circle(value, center, radius);
        Ok(())
    }

    fn tree_mut(&mut self) -> TreeResult<&mut SpatialQuadTree> {
        self.tree.as_mut().ok_or(TreeError::NoTree)
    }
}
