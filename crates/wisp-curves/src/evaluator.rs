//! Vertex counting and span windowing.
//!
//! The curve shader receives only an output vertex index. Everything needed to
//! turn that index into a position (span, local parameter, control window) is
//! decided here, and the same counting rule is used for committed curves and
//! for the preview.

use crate::basis::BasisMatrix;
use crate::curve::CurveKind;
use crate::point::Point2;

/// Upper bound on control points per curve (size of the shader's point array).
pub const MAX_CONTROL_POINTS: usize = 256;

/// Number of usable spans for `n` control points.
///
/// B-spline and Cardinal curves get `n - 3` spans; Bezier curves get
/// `floor((n - 1) / 3)`. Too few points yield zero.
pub fn span_count(kind: CurveKind, n: usize) -> usize {
    match kind {
        CurveKind::BSpline | CurveKind::Cardinal => n.saturating_sub(3),
        CurveKind::Bezier => {
            if n < 4 {
                0
            } else {
                (n - 1) / 3
            }
        }
    }
}

/// Number of vertices to draw: `segments * spans + 1`.
///
/// Returns zero when the curve has no usable span; callers must skip the draw
/// in that case.
pub fn vertex_count(kind: CurveKind, n: usize, segments_per_span: u32) -> u32 {
    let spans = span_count(kind, n);
    if spans == 0 {
        return 0;
    }
    segments_per_span
        .saturating_mul(spans as u32)
        .saturating_add(1)
}

/// Where an output vertex lands on the curve.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexSample {
    /// Span index.
    pub span: usize,
    /// Local parameter in `[0, 1]`.
    pub t: f32,
    /// Index of the first control point of the four-point window.
    pub window_start: usize,
}

/// Maps output vertex `v` to its span and local parameter.
///
/// Vertex `v` falls on span `v / S` at `t = (v % S) / S`. The closing vertex
/// (`v == S * spans`) is expressed as the end of the last span (`t = 1`) so
/// its window never reads past the control points. With `S == 0` the single
/// vertex sits at the start of the first span.
pub fn sample(kind: CurveKind, n: usize, segments_per_span: u32, v: u32) -> Option<VertexSample> {
    let count = vertex_count(kind, n, segments_per_span);
    if v >= count {
        return None;
    }

    let spans = span_count(kind, n);
    let (span, t) = if segments_per_span == 0 {
        (0, 0.0)
    } else {
        let s = segments_per_span as usize;
        let v = v as usize;
        let span = v / s;
        if span >= spans {
            (spans - 1, 1.0)
        } else {
            (span, (v % s) as f32 / s as f32)
        }
    };

    Some(VertexSample { span, t, window_start: span * kind.window_stride() })
}

/// Full CPU evaluation of output vertex `v`.
pub fn evaluate(
    kind: CurveKind,
    points: &[Point2],
    segments_per_span: u32,
    v: u32,
) -> Option<Point2> {
    let s = sample(kind, points.len(), segments_per_span, v)?;
    let window: &[Point2; 4] = points.get(s.window_start..s.window_start + 4)?.try_into().ok()?;
    Some(BasisMatrix::for_kind(kind).blend(s.t, window))
}

/// Evaluates every output vertex of a curve, in draw order.
pub fn polyline(kind: CurveKind, points: &[Point2], segments_per_span: u32) -> Vec<Point2> {
    let count = vertex_count(kind, points.len(), segments_per_span);
    (0..count)
        .filter_map(|v| evaluate(kind, points, segments_per_span, v))
        .collect()
}
