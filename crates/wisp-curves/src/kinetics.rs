//! Per-frame motion of committed control points.
//!
//! Integration is a plain variable-timestep Euler step driven by the wall-clock
//! frame delta. It is deliberately not frame-rate independent.

use crate::point::Point2;

/// Step applied by the speed up / speed down controls.
pub const SPEED_STEP: f32 = 0.03;
/// Value an axis is reset to when speed down pushes it below zero.
pub const SPEED_FLOOR: f32 = 0.001;
/// Range accepted from the speed sliders.
pub const SPEED_RANGE: (f32, f32) = (0.01, 1.0);
/// Range accepted from the segment slider.
pub const SEGMENTS_RANGE: (u32, u32) = (0, 100);

/// What happens when a control point leaves `[-1, 1]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Boundary {
    /// Clamp to the edge and negate that axis of the point's velocity.
    Reflect,
    /// Teleport to the opposite edge, velocity unchanged.
    Wrap,
}

/// Process-wide animation parameters, read every frame and edited by input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    /// Multiplies every control point's own velocity, per axis.
    pub basis_velocity: Point2,
    /// Evaluation density shared by every curve.
    pub segments_per_span: u32,
    pub collisions_enabled: bool,
    pub animation_enabled: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            basis_velocity: Point2::new(0.02, 0.07),
            segments_per_span: 7,
            collisions_enabled: true,
            animation_enabled: true,
        }
    }
}

impl AnimationState {
    /// Random starting speed: `x ∈ [0.01, 0.029)`, `y ∈ [0.01, 0.14)`.
    pub fn random_basis_velocity<R: rand::Rng + ?Sized>(rng: &mut R) -> Point2 {
        Point2::new(
            rng.gen_range(0.0..0.019) + 0.01,
            rng.gen_range(0.0..0.13) + 0.01,
        )
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        if self.collisions_enabled {
            Boundary::Reflect
        } else {
            Boundary::Wrap
        }
    }

    pub fn increment_segments(&mut self) {
        self.segments_per_span = self.segments_per_span.saturating_add(1);
        log::info!("increasing segments: {}", self.segments_per_span);
    }

    pub fn decrement_segments(&mut self) {
        if self.segments_per_span > 0 {
            self.segments_per_span -= 1;
        }
        if self.segments_per_span == 0 {
            log::warn!("minimum number of segments reached");
        }
        log::info!("decreasing segments: {}", self.segments_per_span);
    }

    /// Slider input; clamped to the slider range.
    pub fn set_segments(&mut self, segments: u32) {
        self.segments_per_span = segments.clamp(SEGMENTS_RANGE.0, SEGMENTS_RANGE.1);
    }

    pub fn increase_speed(&mut self) {
        self.basis_velocity.x += SPEED_STEP;
        self.basis_velocity.y += SPEED_STEP;
        log::info!(
            "increasing speed: ({:.3}, {:.3})",
            self.basis_velocity.x,
            self.basis_velocity.y
        );
    }

    pub fn decrease_speed(&mut self) {
        self.basis_velocity.x -= SPEED_STEP;
        if self.basis_velocity.x < 0.0 {
            log::warn!("minimum x-speed reached");
            self.basis_velocity.x = SPEED_FLOOR;
        }

        self.basis_velocity.y -= SPEED_STEP;
        if self.basis_velocity.y < 0.0 {
            log::warn!("minimum y-speed reached");
            self.basis_velocity.y = SPEED_FLOOR;
        }
        log::info!(
            "decreasing speed: ({:.3}, {:.3})",
            self.basis_velocity.x,
            self.basis_velocity.y
        );
    }

    /// Slider input; each axis is clamped to the slider range.
    pub fn set_speed(&mut self, x: f32, y: f32) {
        self.basis_velocity = Point2::new(
            x.clamp(SPEED_RANGE.0, SPEED_RANGE.1),
            y.clamp(SPEED_RANGE.0, SPEED_RANGE.1),
        );
    }
}

/// Advances `points` by `bias * velocity * dt_ms` and resolves the boundary.
///
/// `points` and `velocity` are parallel slices; extra entries in the longer one
/// are left untouched.
pub fn step(
    points: &mut [Point2],
    velocity: &mut [Point2],
    bias: Point2,
    boundary: Boundary,
    dt_ms: f32,
) {
    debug_assert_eq!(points.len(), velocity.len());

    for (p, v) in points.iter_mut().zip(velocity.iter_mut()) {
        p.x += bias.x * v.x * dt_ms;
        p.y += bias.y * v.y * dt_ms;

        match boundary {
            Boundary::Reflect => {
                reflect_axis(&mut p.x, &mut v.x);
                reflect_axis(&mut p.y, &mut v.y);
            }
            Boundary::Wrap => {
                wrap_axis(&mut p.x);
                wrap_axis(&mut p.y);
            }
        }
    }
}

#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32) {
    if *pos < -1.0 {
        *pos = -1.0;
        *vel = -*vel;
    }
    if *pos > 1.0 {
        *pos = 1.0;
        *vel = -*vel;
    }
}

#[inline]
fn wrap_axis(pos: &mut f32) {
    if *pos < -1.0 {
        *pos = 1.0;
    }
    if *pos > 1.0 {
        *pos = -1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn single(x: f32, vx: f32) -> ([Point2; 1], [Point2; 1]) {
        ([Point2::new(x, 0.0)], [Point2::new(vx, 0.0)])
    }

    // ── step ──────────────────────────────────────────────────────────────

    #[test]
    fn moves_by_bias_times_velocity_times_dt() {
        let mut p = [Point2::new(0.0, 0.0)];
        let mut v = [Point2::new(0.01, 0.005)];
        step(&mut p, &mut v, Point2::new(2.0, 4.0), Boundary::Reflect, 10.0);
        assert_float_eq!(p[0].x, 0.2, abs <= 1e-6);
        assert_float_eq!(p[0].y, 0.2, abs <= 1e-6);
    }

    #[test]
    fn reflect_clamps_and_negates_velocity() {
        let (mut p, mut v) = single(1.05, 0.02);
        step(&mut p, &mut v, Point2::new(1.0, 1.0), Boundary::Reflect, 1.0);
        assert_eq!(p[0].x, 1.0);
        assert_float_eq!(v[0].x, -0.02, abs <= 1e-7);
    }

    #[test]
    fn reflect_lower_edge() {
        let mut p = [Point2::new(0.0, -1.2)];
        let mut v = [Point2::new(0.0, -0.01)];
        step(&mut p, &mut v, Point2::new(1.0, 1.0), Boundary::Reflect, 0.0);
        assert_eq!(p[0].y, -1.0);
        assert_float_eq!(v[0].y, 0.01, abs <= 1e-7);
    }

    #[test]
    fn reflect_axes_are_independent() {
        let mut p = [Point2::new(1.5, 0.2)];
        let mut v = [Point2::new(0.01, 0.01)];
        step(&mut p, &mut v, Point2::new(1.0, 1.0), Boundary::Reflect, 1.0);
        assert_eq!(p[0].x, 1.0);
        assert!(v[0].x < 0.0);
        assert!(v[0].y > 0.0);
    }

    #[test]
    fn wrap_teleports_without_touching_velocity() {
        let (mut p, mut v) = single(1.05, 0.02);
        step(&mut p, &mut v, Point2::new(1.0, 1.0), Boundary::Wrap, 1.0);
        assert_eq!(p[0].x, -1.0);
        assert_float_eq!(v[0].x, 0.02, abs <= 1e-7);
    }

    #[test]
    fn wrap_lower_edge_goes_to_top() {
        let mut p = [Point2::new(-1.01, 0.0)];
        let mut v = [Point2::new(-0.02, 0.0)];
        step(&mut p, &mut v, Point2::new(1.0, 1.0), Boundary::Wrap, 0.0);
        assert_eq!(p[0].x, 1.0);
    }

    #[test]
    fn zero_dt_inside_range_is_noop() {
        let mut p = [Point2::new(0.3, -0.7)];
        let mut v = [Point2::new(0.01, 0.01)];
        step(&mut p, &mut v, Point2::new(1.0, 1.0), Boundary::Reflect, 0.0);
        assert_eq!(p[0], Point2::new(0.3, -0.7));
    }

    // ── AnimationState ────────────────────────────────────────────────────

    #[test]
    fn boundary_follows_collision_toggle() {
        let mut s = AnimationState::default();
        assert_eq!(s.boundary(), Boundary::Reflect);
        s.collisions_enabled = false;
        assert_eq!(s.boundary(), Boundary::Wrap);
    }

    #[test]
    fn decrement_segments_floors_at_zero() {
        let mut s = AnimationState { segments_per_span: 1, ..Default::default() };
        s.decrement_segments();
        assert_eq!(s.segments_per_span, 0);
        s.decrement_segments();
        assert_eq!(s.segments_per_span, 0);
    }

    #[test]
    fn decrease_speed_resets_to_floor() {
        let mut s = AnimationState {
            basis_velocity: Point2::new(0.02, 0.5),
            ..Default::default()
        };
        s.decrease_speed();
        assert_eq!(s.basis_velocity.x, SPEED_FLOOR);
        assert_float_eq!(s.basis_velocity.y, 0.47, abs <= 1e-6);
    }

    #[test]
    fn increase_speed_adds_step_on_both_axes() {
        let mut s = AnimationState {
            basis_velocity: Point2::new(0.1, 0.2),
            ..Default::default()
        };
        s.increase_speed();
        assert_float_eq!(s.basis_velocity.x, 0.13, abs <= 1e-6);
        assert_float_eq!(s.basis_velocity.y, 0.23, abs <= 1e-6);
    }

    #[test]
    fn slider_inputs_are_clamped() {
        let mut s = AnimationState::default();
        s.set_speed(0.0, 5.0);
        assert_eq!(s.basis_velocity, Point2::new(0.01, 1.0));
        s.set_segments(500);
        assert_eq!(s.segments_per_span, 100);
    }
}
