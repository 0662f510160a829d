use crate::api::types::WindowUpdate;

/// Input events the sandbox understands.
/// Coordinates are viewport pixels, y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed; starts a stroke.
    PointerDown { x: f32, y: f32 },
    /// Pointer moved, pressed or not.
    PointerMove { x: f32, y: f32 },
    /// Primary button released; finishes the stroke. The release point is
    /// not recorded as a segment.
    PointerUp { x: f32, y: f32 },
    /// Pointer capture lost (blur, touch cancel). Treated like `PointerUp`.
    PointerCancel,
    /// Viewport resized.
    Resize { width: f32, height: f32 },
    /// A UI window moved, resized, opened or closed.
    Window(WindowUpdate),
    /// Erase all ink and reset the spawn point.
    Clear,
    /// Launch a marble from the spawn point.
    Spawn,
}

/// A queue of input events.
/// The host pushes events at any time; the sandbox drains them once per tick
/// so the physics world is only ever touched from one place.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop pending events without handling them.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
