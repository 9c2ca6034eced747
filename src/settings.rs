use crate::error::SettingsError;

/// Tallest tree the demo lets you build.
pub const MAX_TREE_HEIGHT: u8 = 5;

/// Smallest brush radius, as a fraction of the root size
const MIN_BRUSH_RADIUS: f32 = 0.01;

/// How much `+` and `-` scale the brush radius
const BRUSH_STEP: f32 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    /// Write the single leaf under the cursor
    Point,

    /// Write every leaf within the brush radius of the cursor
    Circle,
}

impl BrushMode {
    pub fn toggle(self) -> Self {
        match self {
            BrushMode::Point => BrushMode::Circle,
            BrushMode::Circle => BrushMode::Point,
        }
    }
}

/// Tunables owned by the host. None of these affect how the tree itself behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Max depth of the next tree that gets created
    pub tree_height: u8,

    /// Side length of the root square, in world units
    pub size: f32,

    /// Radius of circle writes, in world units
    pub brush_radius: f32,

    pub brush: BrushMode,

    /// Draw the root frame and the subdivision crosses
    pub show_grid: bool,

    /// Only draw markers for nodes holding `1`
    pub show_only_full_values: bool,

    pub framerate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_height: 3,
            size: 1.0,
            brush_radius: 0.1,
            brush: BrushMode::Point,
            show_grid: true,
            show_only_full_values: false,
            framerate: 60,
        }
    }
}

impl Settings {
    /// Check every field, returning the settings unchanged if they're all in range.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.tree_height > MAX_TREE_HEIGHT {
            return Err(SettingsError::HeightOutOfRange {
                height: self.tree_height,
                max: MAX_TREE_HEIGHT,
            });
        }

        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(SettingsError::InvalidSize { size: self.size });
        }

        if !(self.brush_radius.is_finite() && self.brush_radius > 0.0) {
            return Err(SettingsError::InvalidRadius {
                radius: self.brush_radius,
            });
        }

        if self.framerate == 0 {
            return Err(SettingsError::ZeroFramerate);
        }

        Ok(self)
    }

    pub fn set_tree_height(&mut self, height: u8) -> Result<(), SettingsError> {
        if height > MAX_TREE_HEIGHT {
            return Err(SettingsError::HeightOutOfRange {
                height,
                max: MAX_TREE_HEIGHT,
            });
        }

        self.tree_height = height;
        Ok(())
    }

    /// The brush can grow up to the root size; past that every write covers the whole tree anyway.
    pub fn grow_brush(&mut self) {
        self.brush_radius = (self.brush_radius * BRUSH_STEP).min(self.size);
    }

    pub fn shrink_brush(&mut self) {
        self.brush_radius = (self.brush_radius / BRUSH_STEP).max(MIN_BRUSH_RADIUS * self.size);
    }
}
