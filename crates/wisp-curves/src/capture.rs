use crate::evaluator::MAX_CONTROL_POINTS;
use crate::point::Point2;

/// Minimum distance (NDC units) between consecutive points captured on move.
pub const MIN_POINT_SPACING: f32 = 0.13;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Result of feeding one pointer-move into the session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveOutcome {
    Added,
    /// Closer than [`MIN_POINT_SPACING`] to the previous point.
    TooClose,
    /// Session already holds [`MAX_CONTROL_POINTS`].
    Full,
    /// No drag in progress.
    Ignored,
}

/// Freehand capture of control points from pointer events.
///
/// `Idle → Capturing` on pointer-down, back to `Idle` on pointer-up. Points
/// survive a release that recorded no drag, so several clicks can be placed
/// and then committed manually.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    points: Vec<Point2>,
    state: CaptureState,
    /// At least one point has been added by a move since the last pointer-down.
    moved: bool,
}

impl CaptureSession {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> CaptureState {
        self.state
    }

    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enough points to draw a preview curve.
    #[inline]
    pub fn has_preview(&self) -> bool {
        self.points.len() > 3
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_CONTROL_POINTS
    }

    pub fn pointer_down(&mut self, pos: Point2) {
        if self.is_capturing() {
            return;
        }
        self.state = CaptureState::Capturing;
        self.moved = false;

        if self.push_bounded(pos) {
            log::debug!("capture started at ({:.3}, {:.3})", pos.x, pos.y);
        }
    }

    pub fn pointer_move(&mut self, pos: Point2) -> MoveOutcome {
        if !self.is_capturing() {
            return MoveOutcome::Ignored;
        }

        let last = self.points.last().copied();
        let outcome = match last {
            _ if self.is_full() => {
                log::warn!("maximum number of control points reached ({MAX_CONTROL_POINTS})");
                MoveOutcome::Full
            }
            None => {
                self.points.push(pos);
                MoveOutcome::Added
            }
            Some(last) if last.distance(pos) > MIN_POINT_SPACING => {
                self.points.push(pos);
                MoveOutcome::Added
            }
            Some(_) => MoveOutcome::TooClose,
        };

        if outcome == MoveOutcome::Added {
            self.moved = true;
            log::debug!("captured point ({:.3}, {:.3})", pos.x, pos.y);
        }
        outcome
    }

    /// Ends the drag. Returns `true` when the drag added points and the caller
    /// should attempt a commit.
    ///
    /// After a drag the release position is appended regardless of spacing, so
    /// the curve reaches where the pointer stopped.
    pub fn pointer_up(&mut self, pos: Point2) -> bool {
        if !self.is_capturing() {
            return false;
        }
        self.state = CaptureState::Idle;

        let dragged = std::mem::take(&mut self.moved);
        if dragged {
            self.push_bounded(pos);
        }
        dragged
    }

    /// Hands the captured points over and resets the session.
    pub fn take_points(&mut self) -> Vec<Point2> {
        self.moved = false;
        std::mem::take(&mut self.points)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.moved = false;
    }

    fn push_bounded(&mut self, pos: Point2) -> bool {
        if self.is_full() {
            log::warn!("maximum number of control points reached ({MAX_CONTROL_POINTS})");
            return false;
        }
        self.points.push(pos);
        true
    }
}
