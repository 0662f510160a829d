//! Cosmetic ink effects: hover trails and drips from a held brush.
//! Nothing here touches the physics world.

use glam::Vec2;

use super::color::InkColor;
use super::rng::Rng;

/// Reference frame length for per-frame rates (fall speed, decay).
const FRAME: f32 = 1.0 / 60.0;

const TRAIL_SPACING: f32 = 2.0;
const TRAIL_RADIUS: f32 = 2.0;
const TRAIL_LIFETIME: f32 = 0.025;

/// Moving farther than this between samples restarts the hold timer.
const HOLD_TOLERANCE: f32 = 8.0;
const HOLD_DELAY: f32 = 0.3;
const DRIP_INTERVAL: f32 = 0.04;
const DRIP_DECAY: f32 = 0.97;
const DRIP_MIN_RADIUS: f32 = 0.3;

const MAX_PARTICLES: usize = 4096;

/// A single cosmetic particle.
#[derive(Debug, Clone)]
pub struct InkParticle {
    pub position: Vec2,
    pub radius: f32,
    pub color: InkColor,
    /// Remaining lifetime in seconds.
    pub lifetime: f32,
    /// Downward speed in pixels per 1/60 s.
    pub fall_speed: f32,
    /// Radius multiplier per 1/60 s.
    pub decay: f32,
}

impl InkParticle {
    fn trail(position: Vec2, color: InkColor) -> Self {
        Self {
            position,
            radius: TRAIL_RADIUS,
            color,
            lifetime: TRAIL_LIFETIME,
            fall_speed: 0.0,
            decay: 1.0,
        }
    }

    /// Advance the particle. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        let frames = dt / FRAME;
        self.position.y += self.fall_speed * frames;
        self.radius *= self.decay.powf(frames);
        self.radius >= DRIP_MIN_RADIUS
    }
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    position: Vec2,
    held_for: f32,
}

/// Particle state for trails and drips.
pub struct InkEffects {
    particles: Vec<InkParticle>,
    rng: Rng,
    hold: Option<Hold>,
    since_drip: f32,
}

impl InkEffects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
            hold: None,
            since_drip: 0.0,
        }
    }

    /// Lay trail dots every couple of pixels along a hover path.
    pub fn trail(&mut self, from: Vec2, to: Vec2) {
        let distance = from.distance(to);
        if !distance.is_finite() {
            return;
        }
        let steps = (distance / TRAIL_SPACING) as usize;
        for i in 0..steps {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let t = i as f32 / steps as f32;
            let color = InkColor::random_ink(&mut self.rng);
            self.particles.push(InkParticle::trail(from.lerp(to, t), color));
        }
    }

    /// The brush touched down.
    pub fn begin_hold(&mut self, position: Vec2) {
        self.hold = Some(Hold { position, held_for: 0.0 });
    }

    /// The brush moved while drawing.
    pub fn track_hold(&mut self, position: Vec2) {
        if let Some(hold) = &mut self.hold {
            if hold.position.distance(position) > HOLD_TOLERANCE {
                hold.held_for = 0.0;
            }
            hold.position = position;
        }
    }

    /// The brush lifted.
    pub fn end_hold(&mut self) {
        self.hold = None;
    }

    pub fn tick(&mut self, dt: f32) {
        self.since_drip += dt;
        if let Some(hold) = &mut self.hold {
            hold.held_for += dt;
            let hold = *hold;
            while self.since_drip >= DRIP_INTERVAL {
                self.since_drip -= DRIP_INTERVAL;
                if hold.held_for > HOLD_DELAY {
                    self.spawn_drip(hold.position);
                }
            }
        }
        self.since_drip %= DRIP_INTERVAL;

        self.particles.retain_mut(|p| p.tick(dt));
    }

    fn spawn_drip(&mut self, at: Vec2) {
        if self.particles.len() >= MAX_PARTICLES {
            return;
        }
        let position = Vec2::new(
            at.x + self.rng.range(-5.0, 5.0),
            at.y + self.rng.range(0.0, 10.0),
        );
        let drip = InkParticle {
            position,
            radius: self.rng.range(3.0, 5.0),
            color: InkColor::random_ink(&mut self.rng),
            lifetime: f32::INFINITY,
            fall_speed: self.rng.range(0.5, 1.0),
            decay: DRIP_DECAY,
        };
        self.particles.push(drip);
    }

    pub fn particles(&self) -> &[InkParticle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.hold = None;
        self.since_drip = 0.0;
    }
}
