use std::fmt;

use glam::Vec2;

/// Identifier of a live marble. Unique for the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarbleId(pub u32);

/// Stable key of a UI window mirrored into the physics world.
///
/// The page generates one per window instance; display titles are not
/// used because two windows may share a title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Window rectangle in viewport pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WindowRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// A rectangle that cannot back a collider (zero area or non-finite).
    pub fn is_degenerate(&self) -> bool {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        !finite || self.width <= 0.0 || self.height <= 0.0
    }
}

/// A geometry change reported by the UI layer for one window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowUpdate {
    /// Window was measured, dragged or resized.
    Geometry { id: WindowId, rect: WindowRect },
    /// Window was unmounted.
    Removed { id: WindowId },
}

impl WindowUpdate {
    pub fn id(&self) -> &WindowId {
        match self {
            WindowUpdate::Geometry { id, .. } | WindowUpdate::Removed { id } => id,
        }
    }
}
