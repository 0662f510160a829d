//! Launches marbles from the spawn point and culls the ones that fell away.

use glam::Vec2;

use crate::api::config::MarbleConfig;
use crate::api::types::MarbleId;
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, PhysicsWorld};

/// Air drag applied to every marble.
const MARBLE_DAMPING: f32 = 0.006;

pub struct MarbleSpawner {
    config: MarbleConfig,
}

impl MarbleSpawner {
    pub fn new(config: MarbleConfig) -> Self {
        Self { config }
    }

    /// Launch one marble from above the spawn point.
    ///
    /// Returns `None` when there is no spawn point or the world is not
    /// running. At the cap, the oldest marble is evicted first.
    pub fn spawn(&self, world: &mut PhysicsWorld) -> Option<MarbleId> {
        if !world.is_running() {
            log::warn!("spawn ignored: world is {:?}", world.state());
            return None;
        }
        let Some(spawn_point) = world.spawn_point() else {
            log::warn!("spawn ignored: draw a stroke first to set the spawn point");
            return None;
        };

        while world.marble_count() >= self.config.max_marbles.max(1) {
            match world.evict_oldest_marble() {
                Some(id) => log::debug!("marble cap reached, evicted {:?}", id),
                None => break,
            }
        }

        let velocity = self.launch_velocity(world.first_stroke_direction());
        let position = spawn_point - Vec2::new(0.0, self.config.spawn_height);
        let desc = BodyDesc::dynamic(ColliderDesc::Ball {
            radius: self.config.radius,
        })
        .with_position(position)
        .with_velocity(velocity)
        .with_linear_damping(MARBLE_DAMPING)
        .with_ccd(true);

        let id = world.add_marble(&desc, ColliderMaterial::MARBLE)?;
        log::debug!("spawned {:?} at {:?} with velocity {:?}", id, position, velocity);
        Some(id)
    }

    /// Initial velocity along the first stroke direction, always with some
    /// downward component. Straight down without a direction.
    pub fn launch_velocity(&self, direction: Option<Vec2>) -> Vec2 {
        let speed = self.config.launch_speed;
        match direction {
            Some(d) => Vec2::new(
                d.x * speed,
                d.y.max(self.config.min_vertical) * speed + self.config.downward_bias,
            ),
            None => Vec2::new(0.0, speed),
        }
    }

    /// Remove every marble below the viewport. Returns how many were culled.
    pub fn sweep(&self, world: &mut PhysicsWorld) -> usize {
        let limit = world.viewport().y + self.config.cull_margin;
        let fallen: Vec<MarbleId> = world
            .marbles()
            .filter(|m| m.position.y > limit)
            .map(|m| m.id)
            .collect();
        let culled = fallen.into_iter().filter(|id| world.remove_marble(*id)).count();
        if culled > 0 {
            log::trace!("culled {} marble(s) below y={}", culled, limit);
        }
        culled
    }
}
