//! Mirrors UI window geometry into the physics world.

use crate::api::types::{WindowId, WindowRect, WindowUpdate};
use crate::core::physics::PhysicsWorld;

/// Stateless adapter from window lifecycle notifications to collider updates.
/// Updates resolve last-write-wins in arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowColliderSync;

impl WindowColliderSync {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, world: &mut PhysicsWorld, update: &WindowUpdate) {
        log::trace!("window update {:?}", update);
        world.sync_window_collider(update);
    }

    /// Window mounted, dragged or resized.
    pub fn moved(&self, world: &mut PhysicsWorld, id: WindowId, rect: WindowRect) {
        self.apply(world, &WindowUpdate::Geometry { id, rect });
    }

    /// Window closed.
    pub fn unmounted(&self, world: &mut PhysicsWorld, id: WindowId) {
        self.apply(world, &WindowUpdate::Removed { id });
    }
}
