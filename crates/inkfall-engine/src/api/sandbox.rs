use glam::Vec2;

use crate::api::config::{PhysicsConfig, SandboxConfig};
use crate::core::physics::{PhysicsWorld, WorldState};
use crate::core::time::FixedTimestep;
use crate::ink::capture::{FinishedStroke, PointerMotion, StrokeCapture};
use crate::ink::effects::InkEffects;
use crate::ink::geometry::to_static_colliders_with;
use crate::input::queue::{InputEvent, InputQueue};
use crate::marbles::spawner::MarbleSpawner;
use crate::render::frame::Frame;
use crate::windows::sync::WindowColliderSync;

/// Wires input, drawing, physics and rendering together.
///
/// The host pushes events whenever they happen and calls [`tick`](Self::tick)
/// from its render callback. Events are applied in arrival order at the start
/// of the next tick, then the world advances by whole fixed steps.
pub struct Sandbox {
    config: SandboxConfig,
    world: PhysicsWorld,
    capture: StrokeCapture,
    spawner: MarbleSpawner,
    windows: WindowColliderSync,
    effects: InkEffects,
    input: InputQueue,
    timestep: FixedTimestep,
    frame: Frame,
}

impl Sandbox {
    pub fn new(mut config: SandboxConfig) -> Self {
        let dt = config.physics.fixed_dt;
        if !(dt.is_finite() && dt > 0.0) {
            let fallback = PhysicsConfig::default().fixed_dt;
            log::warn!("invalid fixed_dt {}, using {}", dt, fallback);
            config.physics.fixed_dt = fallback;
        }
        Self {
            world: PhysicsWorld::new(config.physics.clone()),
            capture: StrokeCapture::new(config.ink.clone(), config.seed),
            spawner: MarbleSpawner::new(config.marbles.clone()),
            windows: WindowColliderSync::new(),
            effects: InkEffects::new(config.seed),
            input: InputQueue::new(),
            timestep: FixedTimestep::new(config.physics.fixed_dt),
            frame: Frame::new(),
            config,
        }
    }

    /// Start simulating with the given viewport size.
    pub fn mount(&mut self, width: f32, height: f32) {
        self.world.mount(width, height);
        if self.world.is_running() {
            self.timestep.reset();
            log::info!("sandbox mounted at {}x{}", width, height);
        }
    }

    /// Queue an event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.world.state() == WorldState::Disposed {
            return;
        }
        self.input.push(event);
    }

    /// Run one frame: apply queued input, step the world, rebuild the frame.
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.world.is_running() {
            return;
        }

        for event in self.input.drain() {
            self.handle(event);
        }

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.world.step();
            self.spawner.sweep(&mut self.world);
        }

        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.effects.tick(frame_dt);
        }

        self.frame.rebuild(&self.capture, &self.world, &self.effects);
    }

    /// Release the world. The sandbox ignores everything afterwards.
    pub fn dispose(&mut self) {
        if self.world.state() == WorldState::Disposed {
            return;
        }
        self.world.dispose();
        self.input.clear();
        self.capture.clear();
        self.effects.clear();
        self.frame.clear();
        log::info!("sandbox disposed");
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                let point = Vec2::new(x, y);
                // The world learns the spawn point only once a stroke is committed.
                if let Some(stroke) = self.capture.on_pointer_down(point) {
                    self.commit(stroke);
                }
                self.effects.begin_hold(point);
            }
            InputEvent::PointerMove { x, y } => match self.capture.on_pointer_move(Vec2::new(x, y)) {
                PointerMotion::Drew(segment) => self.effects.track_hold(segment.p2),
                PointerMotion::Hovered { from, to } => self.effects.trail(from, to),
                PointerMotion::Idle => {}
            },
            InputEvent::PointerUp { .. } => {
                if let Some(stroke) = self.capture.on_pointer_up() {
                    self.commit(stroke);
                }
                self.effects.end_hold();
            }
            InputEvent::PointerCancel => {
                if let Some(stroke) = self.capture.on_pointer_cancel() {
                    self.commit(stroke);
                }
                self.effects.end_hold();
            }
            InputEvent::Resize { width, height } => self.world.resize(width, height),
            InputEvent::Window(update) => self.windows.apply(&mut self.world, &update),
            InputEvent::Clear => {
                self.capture.clear();
                self.effects.clear();
                self.world.clear_strokes();
            }
            InputEvent::Spawn => {
                self.spawner.spawn(&mut self.world);
            }
        }
    }

    /// Hand a finished stroke to the world as static colliders.
    fn commit(&mut self, stroke: FinishedStroke) {
        let colliders = to_static_colliders_with(&stroke.segments, self.config.ink.min_segment_length);
        let added = self.world.add_static_colliders(&colliders);
        if let Some(spawn) = stroke.spawn_point {
            self.world.set_spawn_point(spawn);
        }
        log::debug!(
            "stroke of {} segment(s) committed as {} collider(s)",
            stroke.segments.len(),
            added
        );
    }

    // ---- Accessors ----

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn state(&self) -> WorldState {
        self.world.state()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    pub fn effects(&self) -> &InkEffects {
        &self.effects
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Events waiting for the next tick.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}
