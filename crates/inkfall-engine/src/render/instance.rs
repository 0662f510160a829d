use bytemuck::{Pod, Zeroable};

use crate::core::physics::MarbleState;

/// Per-marble render data read by the page through a raw pointer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered size in pixels (the marble diameter).
    pub size: f32,
    pub sprite_col: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// UV cell span (1.0 = single cell).
    pub cell_span: f32,
    pub atlas_row: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn marble(state: &MarbleState) -> Self {
        Self {
            x: state.position.x,
            y: state.position.y,
            rotation: state.rotation,
            size: state.radius * 2.0,
            sprite_col: 0.0,
            alpha: 1.0,
            cell_span: 1.0,
            atlas_row: 0.0,
        }
    }
}

/// Marble instances for the current frame, oldest marble first.
pub struct RenderBuffer {
    instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for the page to copy from.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
