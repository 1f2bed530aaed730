//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers) and builds them
//! lazily on first use.
//!
//! Curve geometry is already in NDC; evaluation happens in the vertex shader.

mod ctx;
mod curve;

pub use ctx::{RenderCtx, RenderTarget};
pub use curve::{CurveRenderer, MAX_CURVE_POINTS, MAX_CURVE_VERTICES};
