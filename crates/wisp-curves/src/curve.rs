use std::fmt;

use rand::Rng;

use crate::color::Rgba;
use crate::evaluator;
use crate::kinetics::{self, AnimationState};
use crate::point::Point2;

/// Curve family. The discriminant is the value the curve shader switches on.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CurveKind {
    #[default]
    BSpline = 0,
    Cardinal = 1,
    Bezier = 2,
}

impl CurveKind {
    pub const ALL: [CurveKind; 3] = [CurveKind::BSpline, CurveKind::Cardinal, CurveKind::Bezier];

    #[inline]
    pub const fn shader_index(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn from_shader_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// How many control points the window advances per span.
    ///
    /// Bezier spans share their end points, so their windows step by three.
    #[inline]
    pub const fn window_stride(self) -> usize {
        match self {
            CurveKind::BSpline | CurveKind::Cardinal => 1,
            CurveKind::Bezier => 3,
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveKind::BSpline => "B-Spline",
            CurveKind::Cardinal => "Catmull-Rom",
            CurveKind::Bezier => "Bezier",
        };
        f.write_str(name)
    }
}

/// Borrowed view of everything the renderer needs to draw one curve.
///
/// Committed curves and the live preview both reduce to this, so the two draw
/// paths share vertex counting and uniform encoding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveView<'a> {
    pub kind: CurveKind,
    pub points: &'a [Point2],
    pub point_size: f32,
    pub color: Rgba,
}

impl CurveView<'_> {
    #[inline]
    pub fn vertex_count(&self, segments_per_span: u32) -> u32 {
        evaluator::vertex_count(self.kind, self.points.len(), segments_per_span)
    }
}

/// A committed, animated curve.
///
/// `kind` never changes after commit and `velocity` always has exactly one
/// entry per control point.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    kind: CurveKind,
    points: Vec<Point2>,
    velocity: Vec<Point2>,
    color: Rgba,
    point_size: f32,
}

impl Curve {
    /// Fewest control points a visible curve can have.
    pub const MIN_POINTS: usize = 4;

    /// Builds a committed curve from captured points.
    ///
    /// Returns `None` when there are too few points; that is not an error, the
    /// capture is simply dropped.
    pub fn commit<R: Rng + ?Sized>(
        kind: CurveKind,
        points: Vec<Point2>,
        color: Rgba,
        rng: &mut R,
    ) -> Option<Self> {
        if points.len() < Self::MIN_POINTS {
            return None;
        }

        let velocity = points
            .iter()
            .map(|_| Point2::new(rng.gen_range(0.0..0.019), rng.gen_range(0.0..0.013)))
            .collect();
        let point_size = rng.gen_range(0.0..10.0) + 3.0;

        Some(Self { kind, points, velocity, color, point_size })
    }

    /// Builds a curve with explicit velocities and point size.
    ///
    /// Returns `None` if the point count is too small or the velocity count
    /// does not match.
    pub fn with_velocity(
        kind: CurveKind,
        points: Vec<Point2>,
        velocity: Vec<Point2>,
        color: Rgba,
        point_size: f32,
    ) -> Option<Self> {
        if points.len() < Self::MIN_POINTS || points.len() != velocity.len() {
            return None;
        }
        Some(Self { kind, points, velocity, color, point_size })
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[inline]
    pub fn velocity(&self) -> &[Point2] {
        &self.velocity
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    #[inline]
    pub fn view(&self) -> CurveView<'_> {
        CurveView {
            kind: self.kind,
            points: &self.points,
            point_size: self.point_size,
            color: self.color,
        }
    }

    /// Moves every control point by one kinetics step of `dt_ms` milliseconds.
    pub fn advance(&mut self, state: &AnimationState, dt_ms: f32) {
        kinetics::step(
            &mut self.points,
            &mut self.velocity,
            state.basis_velocity,
            state.boundary(),
            dt_ms,
        );
    }

    /// CPU evaluation of output vertex `v`, matching the curve shader.
    pub fn evaluate(&self, v: u32, segments_per_span: u32) -> Option<Point2> {
        evaluator::evaluate(self.kind, &self.points, segments_per_span, v)
    }
}

/// The committed curve set, drawn in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CurveSet {
    curves: Vec<Curve>,
}

impl CurveSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    /// Removes every committed curve. Clearing an empty set is a no-op.
    #[inline]
    pub fn clear(&mut self) {
        self.curves.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Curve> {
        self.curves.iter_mut()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }
}
