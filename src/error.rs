use thiserror::Error;

use crate::quadtree::MAX_DEPTH_LIMIT;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("No tree has been created yet")]
    NoTree,

    #[error("Tree size must be a positive finite number, got {size}")]
    InvalidSize { size: f32 },

    #[error("Tree position must be finite, got ({x}, {y})")]
    InvalidPosition { x: f32, y: f32 },

    #[error("Initial value must be finite, got {value}")]
    InvalidValue { value: f32 },

    #[error("Max depth {depth} exceeds the limit of {}", MAX_DEPTH_LIMIT)]
    DepthTooLarge { depth: u8 },
}

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("Tree height {height} is out of range, expected 0..={max}")]
    HeightOutOfRange { height: u8, max: u8 },

    #[error("Brush radius must be a positive finite number, got {radius}")]
    InvalidRadius { radius: f32 },

    #[error("Tree size must be a positive finite number, got {size}")]
    InvalidSize { size: f32 },

    #[error("Frame rate must be at least 1")]
    ZeroFramerate,
}
