//! Coordinate types shared by the runtime, renderer and editor.
//!
//! Two spaces are in play:
//! - window space: logical pixels, origin top-left, +Y down (pointer events)
//! - NDC: `[-1, 1]` on both axes, origin center, +Y up (curve geometry)
//!
//! [`Viewport::to_ndc`] is the only conversion between them.

mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
