pub mod camera;
pub mod error;
pub mod events;
pub mod quadtree;
pub mod render;
pub mod session;
pub mod settings;

pub use crate::error::TreeError;
pub use crate::quadtree::Point;
pub use crate::quadtree::SpatialQuadTree;
pub use crate::session::Session;
