pub mod api;
pub mod core;
pub mod ink;
pub mod input;
pub mod marbles;
pub mod render;
pub mod windows;

// Re-export key types at crate root for convenience
pub use api::config::{InkConfig, MarbleConfig, PhysicsConfig, SandboxConfig};
pub use api::sandbox::Sandbox;
pub use api::types::{MarbleId, WindowId, WindowRect, WindowUpdate};
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, MarbleState, PhysicsBody, PhysicsWorld,
    WorldState,
};
pub use crate::core::time::FixedTimestep;
pub use ink::capture::{FinishedStroke, PointerMotion, StrokeCapture};
pub use ink::color::InkColor;
pub use ink::effects::{InkEffects, InkParticle};
pub use ink::geometry::{to_static_colliders, StaticCollider, StrokeSegment, MIN_SEGMENT_LENGTH};
pub use ink::rng::Rng;
pub use input::queue::{InputEvent, InputQueue};
pub use marbles::spawner::MarbleSpawner;
pub use render::frame::Frame;
pub use render::ink::{InkCanvas, InkVertex};
pub use render::instance::{RenderBuffer, RenderInstance};
pub use windows::sync::WindowColliderSync;
