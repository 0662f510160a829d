use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::config::PhysicsConfig;
use crate::api::types::{MarbleId, WindowId, WindowRect, WindowUpdate};
use crate::ink::geometry::StaticCollider;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn valid_viewport(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Lifecycle of the world. `Running` is entered once by `mount`; there is no pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    Uninitialized,
    Running,
    Disposed,
}

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
    /// Rectangle with rounded corners; outer size is `half + border_radius`.
    RoundCuboid { half_width: f32, half_height: f32, border_radius: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
            ColliderDesc::RoundCuboid { half_width, half_height, border_radius } => {
                ColliderBuilder::round_cuboid(half_width, half_height, border_radius)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl ColliderMaterial {
    /// Drawn ink: a little grip, moderate bounce.
    pub const STROKE: Self = Self { restitution: 0.5, friction: 0.1, density: 1.0 };
    /// Side walls: frictionless, springy.
    pub const WALL: Self = Self { restitution: 0.8, friction: 0.0, density: 1.0 };
    /// UI windows: slippery and very bouncy.
    pub const WINDOW: Self = Self { restitution: 0.9, friction: 0.05, density: 1.0 };
    /// Glass marbles.
    pub const MARBLE: Self = Self { restitution: 0.8, friction: 0.001, density: 1.0 };
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub ccd: bool,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            ccd: false,
            collider,
            linear_damping: 0.0,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Set the linear damping (velocity decay), i.e. air drag.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }
}

/// Handle pair referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Snapshot of one live marble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarbleState {
    pub id: MarbleId,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub radius: f32,
}

struct StrokeBody {
    collider: StaticCollider,
    body: PhysicsBody,
}

struct WindowBody {
    rect: WindowRect,
    body: PhysicsBody,
}

struct MarbleBody {
    id: MarbleId,
    radius: f32,
    body: PhysicsBody,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// The simulation: Rapier2D sets plus the bookkeeping of which body is a
/// wall, a stroke, a window or a marble.
///
/// Every mutating call is a no-op unless the world is `Running`, so callers
/// never need to check the lifecycle themselves.
pub struct PhysicsWorld {
    state: WorldState,
    config: PhysicsConfig,
    viewport: Vec2,
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    walls: Vec<PhysicsBody>,
    strokes: Vec<StrokeBody>,
    windows: HashMap<WindowId, WindowBody>,
    /// Oldest first.
    marbles: VecDeque<MarbleBody>,
    spawn_point: Option<Vec2>,
    first_direction: Option<Vec2>,
    next_marble: u32,
    steps: u64,
}

impl PhysicsWorld {
    /// Create an unmounted world. Nothing is simulated until [`mount`](Self::mount).
    pub fn new(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.fixed_dt;
        Self {
            state: WorldState::Uninitialized,
            viewport: Vec2::ZERO,
            gravity: nalgebra::Vector2::new(0.0, config.gravity),
            config,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            walls: Vec::with_capacity(2),
            strokes: Vec::new(),
            windows: HashMap::new(),
            marbles: VecDeque::new(),
            spawn_point: None,
            first_direction: None,
            next_marble: 1,
            steps: 0,
        }
    }

    /// Enter `Running` with the given viewport and build the side walls.
    pub fn mount(&mut self, width: f32, height: f32) {
        if self.state != WorldState::Uninitialized {
            log::warn!("mount ignored: world is {:?}", self.state);
            return;
        }
        if !valid_viewport(width, height) {
            log::warn!("mount ignored: invalid viewport {}x{}", width, height);
            return;
        }
        self.state = WorldState::Running;
        self.viewport = Vec2::new(width, height);
        self.rebuild_walls();
        log::debug!("physics world mounted at {}x{}", width, height);
    }

    pub fn state(&self) -> WorldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == WorldState::Running
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Number of steps taken since mount.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        if !self.is_running() {
            return;
        }
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Regenerate the side walls for a new viewport. Other bodies stay where
    /// they are; nothing is rescaled.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.is_running() {
            return;
        }
        if !valid_viewport(width, height) {
            log::warn!("resize ignored: invalid viewport {}x{}", width, height);
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.rebuild_walls();
    }

    /// Release every body and stop simulating. Further calls are no-ops.
    pub fn dispose(&mut self) {
        if self.state == WorldState::Disposed {
            return;
        }
        self.state = WorldState::Disposed;
        self.walls.clear();
        self.strokes.clear();
        self.windows.clear();
        self.marbles.clear();
        self.spawn_point = None;
        self.first_direction = None;
        self.island_manager = IslandManager::new();
        self.broad_phase = DefaultBroadPhase::new();
        self.narrow_phase = NarrowPhase::new();
        self.bodies = RigidBodySet::new();
        self.colliders = ColliderSet::new();
        self.impulse_joints = ImpulseJointSet::new();
        self.multibody_joints = MultibodyJointSet::new();
        self.ccd_solver = CCDSolver::new();
        self.query_pipeline = QueryPipeline::new();
        log::debug!("physics world disposed after {} steps", self.steps);
    }

    // -- Strokes --

    /// Insert stroke colliders as fixed bodies. Returns how many were added.
    /// The first collider of a session fixes the marble launch direction.
    pub fn add_static_colliders(&mut self, colliders: &[StaticCollider]) -> usize {
        if !self.is_running() {
            log::debug!("add_static_colliders ignored: world is {:?}", self.state);
            return 0;
        }
        for collider in colliders {
            let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: collider.half_length,
                half_height: collider.thickness / 2.0,
            })
            .with_position(collider.center)
            .with_rotation(collider.angle);
            let body = self.create_body(&desc, ColliderMaterial::STROKE);
            self.strokes.push(StrokeBody {
                collider: *collider,
                body,
            });
        }
        if self.first_direction.is_none() {
            self.first_direction = colliders.first().map(StaticCollider::direction);
        }
        colliders.len()
    }

    /// Record the session spawn point unless one is already set.
    /// Returns whether the point was taken.
    pub fn set_spawn_point(&mut self, point: Vec2) -> bool {
        if !self.is_running() || self.spawn_point.is_some() {
            return false;
        }
        self.spawn_point = Some(point);
        true
    }

    pub fn spawn_point(&self) -> Option<Vec2> {
        self.spawn_point
    }

    /// Unit direction of the first stroke collider added this session.
    pub fn first_stroke_direction(&self) -> Option<Vec2> {
        self.first_direction
    }

    /// Remove every stroke collider and reset the spawn reference.
    /// Walls and window colliders are untouched.
    pub fn clear_strokes(&mut self) {
        if !self.is_running() {
            return;
        }
        let strokes = std::mem::take(&mut self.strokes);
        for stroke in &strokes {
            self.remove_body(&stroke.body);
        }
        self.spawn_point = None;
        self.first_direction = None;
        log::debug!("cleared {} stroke collider(s)", strokes.len());
    }

    pub fn static_collider_count(&self) -> usize {
        self.strokes.len()
    }

    /// Stroke colliders in insertion order.
    pub fn static_colliders(&self) -> impl Iterator<Item = &StaticCollider> + '_ {
        self.strokes.iter().map(|s| &s.collider)
    }

    // -- Windows --

    /// Insert, replace or delete the collider mirroring one UI window.
    ///
    /// Replacement removes the old body and adds the new one within this
    /// call, so a step never sees both or neither.
    pub fn sync_window_collider(&mut self, update: &WindowUpdate) {
        if !self.is_running() {
            log::debug!("window update for '{}' ignored: world is {:?}", update.id(), self.state);
            return;
        }
        if let Some(existing) = self.windows.remove(update.id()) {
            self.remove_body(&existing.body);
        }
        let (id, rect) = match update {
            WindowUpdate::Geometry { id, rect } => (id, *rect),
            WindowUpdate::Removed { .. } => return,
        };
        if rect.is_degenerate() {
            log::debug!("window '{}' has degenerate geometry {:?}; collider dropped", id, rect);
            return;
        }

        let half = rect.half_extents();
        let border = self.config.window_corner_radius.max(0.0).min(half.x).min(half.y);
        let desc = BodyDesc::fixed(ColliderDesc::RoundCuboid {
            half_width: (half.x - border).max(0.01),
            half_height: (half.y - border).max(0.01),
            border_radius: border,
        })
        .with_position(rect.center());
        let body = self.create_body(&desc, ColliderMaterial::WINDOW);
        self.windows.insert(id.clone(), WindowBody { rect, body });
    }

    /// Current rectangle mirrored for a window, if any.
    pub fn window_collider(&self, id: &WindowId) -> Option<WindowRect> {
        self.windows.get(id).map(|w| w.rect)
    }

    pub fn window_collider_count(&self) -> usize {
        self.windows.len()
    }

    // -- Walls --

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Wall centers, left then right.
    pub fn wall_positions(&self) -> Vec<Vec2> {
        self.walls
            .iter()
            .filter_map(|w| self.bodies.get(w.body_handle))
            .map(|rb| na_to_vec2(rb.translation()))
            .collect()
    }

    // -- Marbles --

    /// Create a marble body. Returns `None` unless the world is running.
    pub fn add_marble(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> Option<MarbleId> {
        if !self.is_running() {
            return None;
        }
        let radius = match desc.collider {
            ColliderDesc::Ball { radius } => radius,
            ColliderDesc::Cuboid { half_width, half_height }
            | ColliderDesc::RoundCuboid { half_width, half_height, .. } => half_width.max(half_height),
        };
        let id = MarbleId(self.next_marble);
        self.next_marble += 1;
        let body = self.create_body(desc, material);
        self.marbles.push_back(MarbleBody { id, radius, body });
        Some(id)
    }

    /// Remove a marble. Removing an absent marble is a no-op returning false.
    pub fn remove_marble(&mut self, id: MarbleId) -> bool {
        let Some(idx) = self.marbles.iter().position(|m| m.id == id) else {
            return false;
        };
        match self.marbles.remove(idx) {
            Some(marble) => {
                self.remove_body(&marble.body);
                true
            }
            None => false,
        }
    }

    /// Remove the oldest live marble.
    pub fn evict_oldest_marble(&mut self) -> Option<MarbleId> {
        let marble = self.marbles.pop_front()?;
        self.remove_body(&marble.body);
        Some(marble.id)
    }

    pub fn marble_count(&self) -> usize {
        self.marbles.len()
    }

    /// Live marble ids, oldest first.
    pub fn marble_ids(&self) -> Vec<MarbleId> {
        self.marbles.iter().map(|m| m.id).collect()
    }

    pub fn marble(&self, id: MarbleId) -> Option<MarbleState> {
        let marble = self.marbles.iter().find(|m| m.id == id)?;
        self.marble_state(marble)
    }

    pub fn marble_position(&self, id: MarbleId) -> Option<Vec2> {
        self.marble(id).map(|m| m.position)
    }

    pub fn marble_velocity(&self, id: MarbleId) -> Option<Vec2> {
        self.marble(id).map(|m| m.velocity)
    }

    /// Snapshots of all live marbles, oldest first.
    pub fn marbles(&self) -> impl Iterator<Item = MarbleState> + '_ {
        self.marbles.iter().filter_map(|m| self.marble_state(m))
    }

    /// Number of rigid bodies in the simulation, of every kind.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- private helpers --

    fn marble_state(&self, marble: &MarbleBody) -> Option<MarbleState> {
        let rb = self.bodies.get(marble.body.body_handle)?;
        Some(MarbleState {
            id: marble.id,
            position: na_to_vec2(rb.translation()),
            rotation: rb.rotation().angle(),
            velocity: na_to_vec2(rb.linvel()),
            radius: marble.radius,
        })
    }

    /// Remove old walls and add new ones for the current viewport.
    fn rebuild_walls(&mut self) {
        let old = std::mem::take(&mut self.walls);
        for wall in &old {
            self.remove_body(wall);
        }

        let thickness = self.config.wall_thickness;
        let Vec2 { x: width, y: height } = self.viewport;
        let shape = ColliderDesc::Cuboid {
            half_width: thickness / 2.0,
            half_height: height / 2.0,
        };
        for x in [-thickness / 2.0, width + thickness / 2.0] {
            let desc = BodyDesc::fixed(shape).with_position(Vec2::new(x, height / 2.0));
            let wall = self.create_body(&desc, ColliderMaterial::WALL);
            self.walls.push(wall);
        }
    }

    fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .rotation(desc.rotation)
            .linvel(vec2_to_na(desc.velocity))
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    fn remove_body(&mut self, body: &PhysicsBody) -> bool {
        self.bodies
            .remove(
                body.body_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ink::color::InkColor;
    use crate::ink::geometry::{to_static_colliders, StrokeSegment};

    fn running_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        world.mount(800.0, 600.0);
        world
    }

    fn stroke(points: &[(f32, f32)]) -> Vec<StaticCollider> {
        let segments: Vec<StrokeSegment> = points
            .windows(2)
            .map(|w| StrokeSegment {
                p1: Vec2::new(w[0].0, w[0].1),
                p2: Vec2::new(w[1].0, w[1].1),
                width: 10.0,
                color: InkColor::ACCENT,
            })
            .collect();
        to_static_colliders(&segments)
    }

    fn ball_at(pos: Vec2) -> BodyDesc {
        BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 }).with_position(pos)
    }

    fn w1(x: f32, y: f32, w: f32, h: f32) -> WindowUpdate {
        WindowUpdate::Geometry {
            id: WindowId::from("W1"),
            rect: WindowRect::new(x, y, w, h),
        }
    }

    #[test]
    fn lifecycle_transitions() {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        assert_eq!(world.state(), WorldState::Uninitialized);
        world.mount(800.0, 600.0);
        assert_eq!(world.state(), WorldState::Running);
        assert_eq!(world.wall_count(), 2);
        world.dispose();
        assert_eq!(world.state(), WorldState::Disposed);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn mount_rejects_invalid_viewport() {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        world.mount(f32::NAN, 600.0);
        assert_eq!(world.state(), WorldState::Uninitialized);
        world.mount(800.0, 0.0);
        assert_eq!(world.state(), WorldState::Uninitialized);
        assert_eq!(world.body_count(), 0);

        world.mount(800.0, 600.0);
        assert_eq!(world.state(), WorldState::Running);
        assert!(world.wall_positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn mount_twice_is_ignored() {
        let mut world = running_world();
        world.mount(100.0, 100.0);
        assert_eq!(world.viewport(), Vec2::new(800.0, 600.0));
        assert_eq!(world.wall_count(), 2);
    }

    #[test]
    fn operations_before_mount_are_noops() {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        world.sync_window_collider(&w1(0.0, 0.0, 100.0, 50.0));
        assert_eq!(world.add_static_colliders(&stroke(&[(0.0, 0.0), (50.0, 0.0)])), 0);
        assert!(!world.set_spawn_point(Vec2::ZERO));
        assert!(world.add_marble(&ball_at(Vec2::ZERO), ColliderMaterial::MARBLE).is_none());
        world.step();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.step_count(), 0);
    }

    #[test]
    fn operations_after_dispose_are_noops() {
        let mut world = running_world();
        world.dispose();
        world.sync_window_collider(&w1(0.0, 0.0, 100.0, 50.0));
        world.resize(1000.0, 700.0);
        world.clear_strokes();
        world.step();
        world.dispose();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.window_collider_count(), 0);
        assert_eq!(world.state(), WorldState::Disposed);
    }

    #[test]
    fn static_colliders_become_fixed_bodies() {
        let mut world = running_world();
        let colliders = stroke(&[(100.0, 100.0), (200.0, 100.0), (202.0, 101.0), (300.0, 150.0)]);
        assert_eq!(colliders.len(), 2);
        assert_eq!(world.add_static_colliders(&colliders), 2);
        assert_eq!(world.static_collider_count(), 2);
        assert_eq!(world.body_count(), 4); // + 2 walls

        for _ in 0..10 {
            world.step();
        }
        let first = world.static_colliders().next().unwrap();
        assert_eq!(first.center, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn first_direction_is_kept_across_strokes() {
        let mut world = running_world();
        world.add_static_colliders(&stroke(&[(100.0, 100.0), (300.0, 100.0)]));
        world.add_static_colliders(&stroke(&[(300.0, 300.0), (300.0, 400.0)]));
        let dir = world.first_stroke_direction().unwrap();
        assert!((dir.x - 1.0).abs() < 1e-5 && dir.y.abs() < 1e-5, "dir {:?}", dir);
    }

    #[test]
    fn empty_batch_does_not_set_direction() {
        let mut world = running_world();
        world.add_static_colliders(&[]);
        assert!(world.first_stroke_direction().is_none());
    }

    #[test]
    fn spawn_point_set_once() {
        let mut world = running_world();
        assert!(world.set_spawn_point(Vec2::new(110.0, 95.0)));
        assert!(!world.set_spawn_point(Vec2::new(500.0, 500.0)));
        assert_eq!(world.spawn_point(), Some(Vec2::new(110.0, 95.0)));
    }

    #[test]
    fn clear_strokes_keeps_walls_and_windows() {
        let mut world = running_world();
        world.add_static_colliders(&stroke(&[(0.0, 0.0), (50.0, 0.0), (100.0, 20.0)]));
        world.set_spawn_point(Vec2::new(10.0, -5.0));
        world.sync_window_collider(&w1(100.0, 100.0, 200.0, 100.0));

        world.clear_strokes();

        assert_eq!(world.static_collider_count(), 0);
        assert_eq!(world.wall_count(), 2);
        assert_eq!(world.window_collider_count(), 1);
        assert_eq!(world.body_count(), 3);
        assert!(world.spawn_point().is_none());
        assert!(world.first_stroke_direction().is_none());

        // next session may set a new spawn point
        assert!(world.set_spawn_point(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn window_insert_then_remove() {
        let mut world = running_world();
        world.sync_window_collider(&w1(0.0, 0.0, 100.0, 50.0));
        assert_eq!(world.window_collider_count(), 1);
        world.sync_window_collider(&WindowUpdate::Removed { id: WindowId::from("W1") });
        assert_eq!(world.window_collider_count(), 0);
        assert!(world.window_collider(&WindowId::from("W1")).is_none());
        assert_eq!(world.body_count(), 2);
    }

    #[test]
    fn window_update_replaces_existing() {
        let mut world = running_world();
        world.sync_window_collider(&w1(0.0, 0.0, 100.0, 50.0));
        world.sync_window_collider(&w1(40.0, 60.0, 120.0, 80.0));
        assert_eq!(world.window_collider_count(), 1);
        assert_eq!(world.body_count(), 3);
        assert_eq!(
            world.window_collider(&WindowId::from("W1")),
            Some(WindowRect::new(40.0, 60.0, 120.0, 80.0))
        );
    }

    #[test]
    fn removing_unknown_window_is_noop() {
        let mut world = running_world();
        world.sync_window_collider(&WindowUpdate::Removed { id: WindowId::from("ghost") });
        assert_eq!(world.window_collider_count(), 0);
        assert_eq!(world.body_count(), 2);
    }

    #[test]
    fn degenerate_window_drops_collider() {
        let mut world = running_world();
        world.sync_window_collider(&w1(0.0, 0.0, 100.0, 50.0));
        world.sync_window_collider(&w1(0.0, 0.0, 0.0, 50.0));
        assert_eq!(world.window_collider_count(), 0);
    }

    #[test]
    fn tiny_window_still_gets_a_collider() {
        let mut world = running_world();
        world.sync_window_collider(&w1(0.0, 0.0, 6.0, 4.0));
        assert_eq!(world.window_collider_count(), 1);
        world.step();
    }

    #[test]
    fn resize_regenerates_two_walls() {
        let mut world = running_world();
        world.add_static_colliders(&stroke(&[(100.0, 100.0), (300.0, 100.0)]));
        world.add_marble(&ball_at(Vec2::new(400.0, 100.0)), ColliderMaterial::MARBLE);

        world.resize(1200.0, 600.0);

        assert_eq!(world.wall_count(), 2);
        let walls = world.wall_positions();
        assert_eq!(walls.len(), 2);
        assert!((walls[0].x + 50.0).abs() < 0.001, "left wall {:?}", walls[0]);
        assert!((walls[1].x - 1250.0).abs() < 0.001, "right wall {:?}", walls[1]);
        assert!((walls[1].y - 300.0).abs() < 0.001);
        assert_eq!(world.static_collider_count(), 1);
        assert_eq!(world.marble_count(), 1);
        assert_eq!(world.body_count(), 4);
    }

    #[test]
    fn invalid_resize_keeps_walls() {
        let mut world = running_world();
        world.resize(0.0, 600.0);
        world.resize(f32::NAN, 600.0);
        assert_eq!(world.viewport(), Vec2::new(800.0, 600.0));
        assert_eq!(world.wall_count(), 2);
    }

    #[test]
    fn gravity_pulls_marbles_down_slowly() {
        let mut world = running_world();
        let id = world
            .add_marble(&ball_at(Vec2::new(400.0, 0.0)), ColliderMaterial::MARBLE)
            .unwrap();
        for _ in 0..60 {
            world.step();
        }
        let pos = world.marble_position(id).unwrap();
        assert!(pos.y > 0.0, "marble should fall: y={}", pos.y);
        assert!(pos.y < 600.0, "one second must not cross the screen: y={}", pos.y);
    }

    #[test]
    fn marble_bounces_off_stroke() {
        let mut world = running_world();
        world.add_static_colliders(&stroke(&[(200.0, 300.0), (600.0, 300.0)]));
        let id = world
            .add_marble(&ball_at(Vec2::new(400.0, 250.0)), ColliderMaterial::MARBLE)
            .unwrap();
        for _ in 0..240 {
            world.step();
        }
        let pos = world.marble_position(id).unwrap();
        assert!(pos.y < 300.0, "marble should rest on the line: y={}", pos.y);
    }

    #[test]
    fn marble_is_held_by_window() {
        let mut world = running_world();
        world.sync_window_collider(&w1(300.0, 300.0, 200.0, 100.0));
        let id = world
            .add_marble(&ball_at(Vec2::new(400.0, 250.0)), ColliderMaterial::MARBLE)
            .unwrap();
        for _ in 0..240 {
            world.step();
        }
        let pos = world.marble_position(id).unwrap();
        assert!(pos.y < 300.0, "marble should stay above the window: y={}", pos.y);
    }

    #[test]
    fn marbles_fifo_and_idempotent_removal() {
        let mut world = running_world();
        let a = world.add_marble(&ball_at(Vec2::new(100.0, 0.0)), ColliderMaterial::MARBLE).unwrap();
        let b = world.add_marble(&ball_at(Vec2::new(200.0, 0.0)), ColliderMaterial::MARBLE).unwrap();
        assert_eq!(world.marble_ids(), vec![a, b]);

        assert_eq!(world.evict_oldest_marble(), Some(a));
        assert!(!world.remove_marble(a));
        assert!(world.remove_marble(b));
        assert!(!world.remove_marble(b));
        assert_eq!(world.evict_oldest_marble(), None);
        assert_eq!(world.marble_count(), 0);
        assert_eq!(world.body_count(), 2);
    }

    #[test]
    fn marble_state_reports_velocity() {
        let mut world = running_world();
        let id = world
            .add_marble(
                &ball_at(Vec2::new(100.0, 100.0)).with_velocity(Vec2::new(50.0, -30.0)),
                ColliderMaterial::MARBLE,
            )
            .unwrap();
        let vel = world.marble_velocity(id).unwrap();
        assert!((vel.x - 50.0).abs() < 0.001);
        assert!((vel.y + 30.0).abs() < 0.001);
        let state = world.marbles().next().unwrap();
        assert!((state.radius - 10.0).abs() < 0.001);
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(10.0, 20.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_rotation(0.5)
            .with_linear_damping(0.1)
            .with_ccd(true);

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(10.0, 20.0));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert!(desc.ccd);

        let fixed = BodyDesc::fixed(ColliderDesc::Ball { radius: 5.0 });
        assert_eq!(fixed.body_type, BodyType::Fixed);
    }
}
