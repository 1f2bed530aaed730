use core::ops::Range;

use crate::coords::ColorRgba;

/// Primitive assembly for a curve draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Consecutive evaluated vertices joined by line segments.
    LineStrip,
    /// One disc per evaluated vertex.
    Points,
}

/// One evaluated-curve draw.
///
/// `kind` and `segments` are the shader-side encodings (basis index and
/// segments per span). `points` indexes into the owning list's point arena.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveCmd {
    pub topology: Topology,
    pub kind: u32,
    pub segments: u32,
    pub points: Range<u32>,
    pub point_size: f32,
    pub color: ColorRgba,
    pub vertex_count: u32,
}

impl CurveCmd {
    #[inline]
    pub fn point_count(&self) -> u32 {
        self.points.end - self.points.start
    }
}

/// Renderer-agnostic draw command stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Curve(CurveCmd),
}
