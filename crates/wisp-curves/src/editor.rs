//! Single-owner editor state.
//!
//! Every mutation (pointer events, commands, frame ticks) goes through a
//! `&mut CurveEditor`, so there is exactly one logical queue of changes.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::capture::{CaptureSession, MoveOutcome};
use crate::collector::{CurveSink, FrameStats, PREVIEW_POINT_SIZE, SceneCollector, Visibility};
use crate::color::{ColorAssignment, Rgba};
use crate::curve::{Curve, CurveKind, CurveSet, CurveView};
use crate::kinetics::AnimationState;
use crate::point::Point2;

/// Discrete editor actions, produced by key bindings or the control panel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EditorCommand {
    CommitCapture,
    ClearCurves,
    IncrementSegments,
    DecrementSegments,
    SetSegments(u32),
    IncreaseSpeed,
    DecreaseSpeed,
    SetSpeed { x: f32, y: f32 },
    ToggleAnimation,
    ToggleCollisions,
    ToggleLines,
    TogglePoints,
    SelectKind(CurveKind),
    SetPendingColor(Rgba),
}

pub struct CurveEditor<R = StdRng> {
    curves: CurveSet,
    session: CaptureSession,
    animation: AnimationState,
    visibility: Visibility,
    kind: CurveKind,
    color: ColorAssignment,
    collector: SceneCollector,
    rng: R,
}

impl CurveEditor<StdRng> {
    /// Editor with default settings, a random starting speed and an
    /// entropy-seeded generator.
    pub fn with_entropy() -> Self {
        let mut rng = StdRng::from_entropy();
        let animation = AnimationState {
            basis_velocity: AnimationState::random_basis_velocity(&mut rng),
            ..AnimationState::default()
        };
        Self::new(animation, Visibility::default(), CurveKind::default(), rng)
    }
}

impl<R: Rng> CurveEditor<R> {
    pub fn new(animation: AnimationState, visibility: Visibility, kind: CurveKind, rng: R) -> Self {
        Self {
            curves: CurveSet::new(),
            session: CaptureSession::new(),
            animation,
            visibility,
            kind,
            color: ColorAssignment::Random,
            collector: SceneCollector::new(),
            rng,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    #[inline]
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    #[inline]
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[inline]
    pub fn color_assignment(&self) -> ColorAssignment {
        self.color
    }

    /// The live capture as a curve view, if it has enough points to draw.
    pub fn preview(&self) -> Option<CurveView<'_>> {
        preview_view(&self.session, self.kind, self.color)
    }

    // ── pointer input (NDC) ───────────────────────────────────────────────

    pub fn pointer_down(&mut self, pos: Point2) {
        self.session.pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Point2) -> MoveOutcome {
        self.session.pointer_move(pos)
    }

    /// Ends a drag; commits the capture when the drag added points.
    pub fn pointer_up(&mut self, pos: Point2) -> bool {
        if self.session.pointer_up(pos) {
            self.commit_capture()
        } else {
            false
        }
    }

    // ── commands ──────────────────────────────────────────────────────────

    /// Promotes the capture to a committed curve when it has more than three
    /// points. The capture and any pending colour are reset either way.
    pub fn commit_capture(&mut self) -> bool {
        let color = std::mem::take(&mut self.color).resolve(&mut self.rng);
        let points = self.session.take_points();
        let count = points.len();

        match Curve::commit(self.kind, points, color, &mut self.rng) {
            Some(curve) => {
                log::info!("committed {} curve with {count} control points", self.kind);
                self.curves.push(curve);
                true
            }
            None => {
                log::debug!("discarded capture with {count} points");
                false
            }
        }
    }

    pub fn clear_curves(&mut self) {
        self.curves.clear();
        log::info!("cleared curves");
    }

    pub fn apply(&mut self, cmd: EditorCommand) {
        match cmd {
            EditorCommand::CommitCapture => {
                self.commit_capture();
            }
            EditorCommand::ClearCurves => self.clear_curves(),
            EditorCommand::IncrementSegments => self.animation.increment_segments(),
            EditorCommand::DecrementSegments => self.animation.decrement_segments(),
            EditorCommand::SetSegments(n) => self.animation.set_segments(n),
            EditorCommand::IncreaseSpeed => self.animation.increase_speed(),
            EditorCommand::DecreaseSpeed => self.animation.decrease_speed(),
            EditorCommand::SetSpeed { x, y } => self.animation.set_speed(x, y),
            EditorCommand::ToggleAnimation => {
                self.animation.animation_enabled = !self.animation.animation_enabled;
                log::info!("animation {}", on_off(self.animation.animation_enabled));
            }
            EditorCommand::ToggleCollisions => {
                self.animation.collisions_enabled = !self.animation.collisions_enabled;
                log::info!("collisions {}", on_off(self.animation.collisions_enabled));
            }
            EditorCommand::ToggleLines => {
                self.visibility.lines = !self.visibility.lines;
                log::info!("curve lines {}", on_off(self.visibility.lines));
            }
            EditorCommand::TogglePoints => {
                self.visibility.points = !self.visibility.points;
                log::info!("curve points {}", on_off(self.visibility.points));
            }
            EditorCommand::SelectKind(kind) => {
                self.kind = kind;
                log::info!("curve type set to {kind}");
            }
            EditorCommand::SetPendingColor(c) => {
                self.color = ColorAssignment::Pending(c);
            }
        }
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// One animation tick: kinetics, then draw calls for committed curves and
    /// the preview. `dt_ms` is the wall-clock time since the previous tick.
    pub fn tick<S: CurveSink + ?Sized>(&mut self, dt_ms: f32, sink: &mut S) -> FrameStats {
        let preview = preview_view(&self.session, self.kind, self.color);

        self.collector.collect(
            &mut self.curves,
            preview,
            &self.animation,
            self.visibility,
            dt_ms,
            sink,
        )
    }
}

fn preview_view(
    session: &CaptureSession,
    kind: CurveKind,
    color: ColorAssignment,
) -> Option<CurveView<'_>> {
    session.has_preview().then(|| CurveView {
        kind,
        points: session.points(),
        point_size: PREVIEW_POINT_SIZE,
        color: color.preview_color(),
    })
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}
