//! Wisp engine crate.
//!
//! Owns the platform and GPU runtime: the winit event loop, the wgpu surface,
//! platform-agnostic input, frame timing, and the curve renderer that consumes
//! a recorded draw list.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod render;
pub mod scene;
