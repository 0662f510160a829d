use crate::core::physics::PhysicsWorld;
use crate::ink::capture::StrokeCapture;
use crate::ink::effects::InkEffects;

use super::ink::InkCanvas;
use super::instance::{RenderBuffer, RenderInstance};

/// Everything the page needs to draw one frame.
pub struct Frame {
    pub ink: InkCanvas,
    pub marbles: RenderBuffer,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            ink: InkCanvas::new(),
            marbles: RenderBuffer::new(),
        }
    }

    /// Rebuild both buffers from scratch.
    /// Layering, bottom to top: colliders, ink, flag, particles, marbles.
    pub fn rebuild(&mut self, capture: &StrokeCapture, world: &PhysicsWorld, effects: &InkEffects) {
        self.ink.clear();
        self.marbles.clear();

        self.ink.draw_colliders(world.static_colliders());
        self.ink.draw_segments(capture.finished_segments());
        self.ink.draw_segments(capture.current_segments());
        if let Some(at) = capture.spawn_point() {
            self.ink.draw_flag(at);
        }
        for particle in effects.particles() {
            self.ink.fill_circle(particle.position, particle.radius, particle.color);
        }

        for marble in world.marbles() {
            self.marbles.push(RenderInstance::marble(&marble));
        }
    }

    pub fn clear(&mut self) {
        self.ink.clear();
        self.marbles.clear();
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
