//! CPU-side render targets read by the page each frame.

pub mod frame;
pub mod ink;
pub mod instance;
