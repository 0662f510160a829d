use serde::{Deserialize, Serialize};

/// Simulation tunables. Y grows downward, units are viewport pixels and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Downward acceleration in px/s². Kept low so a full-screen fall
    /// takes a few seconds.
    pub gravity: f32,
    /// Thickness of the invisible side walls.
    pub wall_thickness: f32,
    /// Corner rounding of window colliders.
    pub window_corner_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            gravity: 250.0,
            wall_thickness: 100.0,
            window_corner_radius: 10.0,
        }
    }
}

/// Marble spawning and culling tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarbleConfig {
    /// Population cap; the oldest marble is evicted beyond it.
    pub max_marbles: usize,
    pub radius: f32,
    /// Launch speed along the first stroke direction (px/s).
    pub launch_speed: f32,
    /// Constant downward velocity added at launch (px/s).
    pub downward_bias: f32,
    /// Lower bound of the normalized vertical launch component.
    pub min_vertical: f32,
    /// Marbles appear this far above the spawn point.
    pub spawn_height: f32,
    /// Marbles are culled once this far below the viewport bottom.
    pub cull_margin: f32,
}

impl Default for MarbleConfig {
    fn default() -> Self {
        Self {
            max_marbles: 50,
            radius: 10.0,
            launch_speed: 120.0,
            downward_bias: 12.0,
            min_vertical: 0.1,
            spawn_height: 50.0,
            cull_margin: 50.0,
        }
    }
}

/// Drawing surface tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkConfig {
    pub stroke_width: f32,
    /// Segments shorter than this never become colliders.
    pub min_segment_length: f32,
    /// Offset from the first pointer-down to the spawn flag.
    pub spawn_offset_x: f32,
    pub spawn_offset_y: f32,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            stroke_width: 10.0,
            min_segment_length: 5.0,
            spawn_offset_x: 10.0,
            spawn_offset_y: -5.0,
        }
    }
}

/// Top-level sandbox configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Seed for stroke colors and cosmetic effects.
    pub seed: u64,
    pub physics: PhysicsConfig,
    pub marbles: MarbleConfig,
    pub ink: InkConfig,
}

impl SandboxConfig {
    /// Parse a configuration from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
