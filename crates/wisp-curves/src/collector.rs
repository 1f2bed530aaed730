//! Turns the curve set into uniform uploads and draw calls.
//!
//! The renderer sits behind [`CurveSink`]. It is assumed to keep no state
//! between draws, so every draw is preceded by a full [`CurveUniforms`] upload.

use crate::color::Rgba;
use crate::curve::{CurveKind, CurveSet, CurveView};
use crate::evaluator::MAX_CONTROL_POINTS;
use crate::kinetics::AnimationState;

/// Point size used for the in-progress preview curve.
pub const PREVIEW_POINT_SIZE: f32 = 7.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    LineStrip,
    Points,
}

/// Which primitives are drawn for each curve.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Visibility {
    pub lines: bool,
    pub points: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self { lines: true, points: true }
    }
}

/// Per-draw uniform block: fixed-capacity control-point array plus the number
/// of entries in use.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveUniforms {
    pub kind: CurveKind,
    pub points: [[f32; 2]; MAX_CONTROL_POINTS],
    pub active_points: u32,
    pub point_size: f32,
    pub color: Rgba,
}

impl Default for CurveUniforms {
    fn default() -> Self {
        Self {
            kind: CurveKind::default(),
            points: [[0.0; 2]; MAX_CONTROL_POINTS],
            active_points: 0,
            point_size: 1.0,
            color: Rgba::white(),
        }
    }
}

impl CurveUniforms {
    /// Overwrites this block with `view`. Points past the array capacity are dropped.
    pub fn encode(&mut self, view: &CurveView<'_>) {
        let n = view.points.len().min(MAX_CONTROL_POINTS);
        if view.points.len() > MAX_CONTROL_POINTS {
            log::warn!(
                "curve has {} control points, uploading first {MAX_CONTROL_POINTS}",
                view.points.len()
            );
        }

        for (slot, p) in self.points.iter_mut().zip(&view.points[..n]) {
            *slot = p.to_array();
        }
        self.kind = view.kind;
        self.active_points = n as u32;
        self.point_size = view.point_size;
        self.color = view.color;
    }

    #[inline]
    pub fn active(&self) -> &[[f32; 2]] {
        &self.points[..self.active_points as usize]
    }
}

/// The rendering boundary.
pub trait CurveSink {
    /// Shared evaluation density, uploaded once per frame.
    fn set_segments(&mut self, segments_per_span: u32);

    /// Replaces all per-curve uniforms.
    fn upload(&mut self, uniforms: &CurveUniforms);

    /// Draws `vertex_count` vertices (index stream `0..vertex_count`) with the
    /// most recent upload. Never called with a zero count.
    fn draw(&mut self, primitive: Primitive, vertex_count: u32);
}

/// Counters for one collected frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub curves: u32,
    pub draw_calls: u32,
    /// Curves skipped because their vertex count was zero.
    pub suppressed: u32,
    pub preview: bool,
}

/// Reusable per-frame collector.
///
/// Owns the uniform scratch block so a frame never allocates.
#[derive(Debug, Default)]
pub struct SceneCollector {
    scratch: Box<CurveUniforms>,
}

impl SceneCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame: kinetics (when enabled) on every committed curve, then
    /// committed curves in order, then the preview if one is given.
    pub fn collect<S: CurveSink + ?Sized>(
        &mut self,
        curves: &mut CurveSet,
        preview: Option<CurveView<'_>>,
        animation: &AnimationState,
        visibility: Visibility,
        dt_ms: f32,
        sink: &mut S,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        let segments = animation.segments_per_span;
        sink.set_segments(segments);

        for curve in curves.iter_mut() {
            if animation.animation_enabled {
                curve.advance(animation, dt_ms);
            }
            self.emit(&curve.view(), segments, visibility, sink, &mut stats);
        }

        if let Some(view) = preview {
            stats.preview = true;
            self.emit(&view, segments, visibility, sink, &mut stats);
        }

        stats
    }

    fn emit<S: CurveSink + ?Sized>(
        &mut self,
        view: &CurveView<'_>,
        segments: u32,
        visibility: Visibility,
        sink: &mut S,
        stats: &mut FrameStats,
    ) {
        stats.curves += 1;

        let count = view.vertex_count(segments);
        if count == 0 {
            log::trace!("skipping {} curve with {} points", view.kind, view.points.len());
            stats.suppressed += 1;
            return;
        }

        self.scratch.encode(view);
        sink.upload(&self.scratch);

        if visibility.lines {
            sink.draw(Primitive::LineStrip, count);
            stats.draw_calls += 1;
        }
        if visibility.points {
            sink.draw(Primitive::Points, count);
            stats.draw_calls += 1;
        }
    }
}

/// Sink that records every call, for tests and headless runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSink {
    pub segments: Vec<u32>,
    pub uploads: Vec<CurveUniforms>,
    /// `(upload index, primitive, vertex count)`.
    pub draws: Vec<(usize, Primitive, u32)>,
}

impl CurveSink for RecordingSink {
    fn set_segments(&mut self, segments_per_span: u32) {
        self.segments.push(segments_per_span);
    }

    fn upload(&mut self, uniforms: &CurveUniforms) {
        self.uploads.push(uniforms.clone());
    }

    fn draw(&mut self, primitive: Primitive, vertex_count: u32) {
        let index = self.uploads.len().saturating_sub(1);
        self.draws.push((index, primitive, vertex_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::point::Point2;

    fn curve(kind: CurveKind, n: usize) -> Curve {
        let points = (0..n).map(|i| Point2::new(i as f32 * 0.1 - 0.5, 0.0)).collect();
        let velocity = vec![Point2::new(0.01, 0.0); n];
        Curve::with_velocity(kind, points, velocity, Rgba::white(), 5.0).unwrap()
    }

    fn anim(segments: u32) -> AnimationState {
        AnimationState {
            basis_velocity: Point2::new(1.0, 1.0),
            segments_per_span: segments,
            collisions_enabled: true,
            animation_enabled: true,
        }
    }

    // ── draw calls ────────────────────────────────────────────────────────

    #[test]
    fn uploads_segments_once_then_draws_each_curve() {
        let mut set = CurveSet::new();
        set.push(curve(CurveKind::BSpline, 10));
        set.push(curve(CurveKind::Bezier, 10));

        let mut sink = RecordingSink::default();
        let stats = SceneCollector::new().collect(
            &mut set, None, &anim(7), Visibility::default(), 0.0, &mut sink,
        );

        assert_eq!(sink.segments, vec![7]);
        assert_eq!(sink.uploads.len(), 2);
        assert_eq!(
            sink.draws,
            vec![
                (0, Primitive::LineStrip, 50),
                (0, Primitive::Points, 50),
                (1, Primitive::LineStrip, 22),
                (1, Primitive::Points, 22),
            ]
        );
        assert_eq!(stats.draw_calls, 4);
        assert_eq!(stats.curves, 2);
    }

    #[test]
    fn visibility_toggles_select_primitives() {
        let mut set = CurveSet::new();
        set.push(curve(CurveKind::Cardinal, 6));
        let mut sink = RecordingSink::default();
        let vis = Visibility { lines: false, points: true };
        SceneCollector::new().collect(&mut set, None, &anim(4), vis, 0.0, &mut sink);
        assert_eq!(sink.draws, vec![(0, Primitive::Points, 13)]);

        let mut sink = RecordingSink::default();
        let vis = Visibility { lines: false, points: false };
        SceneCollector::new().collect(&mut set, None, &anim(4), vis, 0.0, &mut sink);
        assert!(sink.draws.is_empty());
        assert_eq!(sink.uploads.len(), 1);
    }

    #[test]
    fn preview_is_drawn_after_committed_curves() {
        let mut set = CurveSet::new();
        set.push(curve(CurveKind::BSpline, 5));
        let live: Vec<Point2> = (0..7).map(|i| Point2::new(i as f32 * 0.2 - 0.6, 0.1)).collect();
        let preview = CurveView {
            kind: CurveKind::Bezier,
            points: &live,
            point_size: PREVIEW_POINT_SIZE,
            color: Rgba::white(),
        };

        let mut sink = RecordingSink::default();
        let stats = SceneCollector::new().collect(
            &mut set, Some(preview), &anim(3), Visibility::default(), 0.0, &mut sink,
        );

        assert!(stats.preview);
        assert_eq!(sink.uploads.len(), 2);
        let last = &sink.uploads[1];
        assert_eq!(last.kind, CurveKind::Bezier);
        assert_eq!(last.active_points, 7);
        assert_eq!(last.point_size, PREVIEW_POINT_SIZE);
        assert_eq!(sink.draws.last(), Some(&(1, Primitive::Points, 7)));
    }

    // ── kinetics integration ──────────────────────────────────────────────

    #[test]
    fn kinetics_runs_only_when_enabled() {
        let mut set = CurveSet::new();
        set.push(curve(CurveKind::BSpline, 4));
        let before = set.get(0).unwrap().points().to_vec();

        let mut paused = anim(7);
        paused.animation_enabled = false;
        let mut sink = RecordingSink::default();
        SceneCollector::new().collect(&mut set, None, &paused, Visibility::default(), 16.0, &mut sink);
        assert_eq!(set.get(0).unwrap().points(), before.as_slice());

        SceneCollector::new().collect(&mut set, None, &anim(7), Visibility::default(), 16.0, &mut sink);
        assert_ne!(set.get(0).unwrap().points(), before.as_slice());
    }

    #[test]
    fn kinetics_preserves_velocity_parity() {
        let mut set = CurveSet::new();
        set.push(curve(CurveKind::Cardinal, 9));
        let mut collector = SceneCollector::new();
        let mut sink = RecordingSink::default();
        for _ in 0..100 {
            collector.collect(&mut set, None, &anim(2), Visibility::default(), 33.0, &mut sink);
        }
        let c = set.get(0).unwrap();
        assert_eq!(c.points().len(), c.velocity().len());
        assert!(c.points().iter().all(|p| (-1.0..=1.0).contains(&p.x)));
    }

    // ── suppression ───────────────────────────────────────────────────────

    #[test]
    fn zero_vertex_preview_is_suppressed() {
        let mut set = CurveSet::new();
        let few = [Point2::zero(); 3];
        let preview = CurveView {
            kind: CurveKind::BSpline,
            points: &few,
            point_size: PREVIEW_POINT_SIZE,
            color: Rgba::white(),
        };
        let mut sink = RecordingSink::default();
        let stats = SceneCollector::new().collect(
            &mut set, Some(preview), &anim(7), Visibility::default(), 0.0, &mut sink,
        );
        assert_eq!(stats.suppressed, 1);
        assert!(sink.uploads.is_empty());
        assert!(sink.draws.is_empty());
    }

    // ── encoding ──────────────────────────────────────────────────────────

    #[test]
    fn encode_overwrites_previous_curve() {
        let mut u = CurveUniforms::default();
        let long: Vec<Point2> = (0..8).map(|i| Point2::new(i as f32, 1.0)).collect();
        let short = [Point2::new(-1.0, -1.0); 4];
        let color = Rgba::new(0.2, 0.3, 0.4, 0.5);

        u.encode(&CurveView { kind: CurveKind::Bezier, points: &long, point_size: 3.0, color });
        u.encode(&CurveView { kind: CurveKind::BSpline, points: &short, point_size: 9.0, color });

        assert_eq!(u.kind, CurveKind::BSpline);
        assert_eq!(u.active_points, 4);
        assert_eq!(u.active(), &[[-1.0, -1.0]; 4]);
        assert_eq!(u.point_size, 9.0);
        assert_eq!(u.color, color);
    }
}
