//! Cubic basis matrices, one per curve kind.
//!
//! A point on a span is `[t³ t² t 1] · M · [P0 P1 P2 P3]ᵀ`, where `P0..P3` is the
//! span's four-point control window. The curve shader carries the same table.

use crate::curve::CurveKind;
use crate::point::Point2;

/// Row-major 4x4 cubic basis matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BasisMatrix(pub [[f32; 4]; 4]);

/// Uniform cubic B-spline.
pub const BSPLINE: BasisMatrix = BasisMatrix([
    [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
    [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0],
    [-3.0 / 6.0, 0.0, 3.0 / 6.0, 0.0],
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
]);

/// Cardinal spline with tension 0.5 (Catmull-Rom).
pub const CARDINAL: BasisMatrix = BasisMatrix([
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
]);

/// Cubic Bezier (Bernstein form).
pub const BEZIER: BasisMatrix = BasisMatrix([
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
]);

impl BasisMatrix {
    #[inline]
    pub const fn for_kind(kind: CurveKind) -> Self {
        match kind {
            CurveKind::BSpline => BSPLINE,
            CurveKind::Cardinal => CARDINAL,
            CurveKind::Bezier => BEZIER,
        }
    }

    /// Blending weights of the four window points at local parameter `t`.
    pub fn weights(&self, t: f32) -> [f32; 4] {
        let powers = [t * t * t, t * t, t, 1.0];
        let m = &self.0;
        let mut w = [0.0f32; 4];
        for (col, weight) in w.iter_mut().enumerate() {
            *weight = powers
                .iter()
                .zip(m.iter())
                .map(|(p, row)| p * row[col])
                .sum();
        }
        w
    }

    /// Position at `t` for the control window `p`.
    pub fn blend(&self, t: f32, p: &[Point2; 4]) -> Point2 {
        let w = self.weights(t);
        p.iter()
            .zip(w)
            .fold(Point2::zero(), |acc, (&pt, wi)| acc + pt * wi)
    }
}
