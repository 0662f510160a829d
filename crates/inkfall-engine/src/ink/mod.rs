//! Drawing: pointer capture, stroke geometry and cosmetic ink effects.

pub mod capture;
pub mod color;
pub mod effects;
pub mod geometry;
pub mod rng;
