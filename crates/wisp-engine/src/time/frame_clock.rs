use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Zero on the first tick.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// `dt` in milliseconds.
    #[inline]
    pub fn dt_ms(&self) -> f32 {
        self.dt * 1000.0
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The baseline is taken from the first tick, so the first frame always sees a
/// zero delta. Deltas are raw wall-clock time unless clamps are configured with
/// [`with_clamps`](Self::with_clamps).
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    clamps: Option<(Duration, Duration)>,
}

impl FrameClock {
    /// Creates an unclamped clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock whose non-first deltas are clamped to `[dt_min, dt_max]`.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            clamps: Some((dt_min, dt_max)),
        }
    }

    /// Forgets the baseline; the next tick reports a zero delta again.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock using the current time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            None => Duration::ZERO,
            Some(last) => {
                let raw = now.saturating_duration_since(last);
                match self.clamps {
                    Some((lo, hi)) => raw.clamp(lo, hi),
                    None => raw,
                }
            }
        };

        self.last = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn later_ticks_report_wall_clock_delta() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_millis(16));
        assert_float_eq!(ft.dt_ms(), 16.0, abs <= 1e-3);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn unclamped_keeps_long_stalls() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(2));
        assert_float_eq!(ft.dt, 2.0, abs <= 1e-6);
    }

    #[test]
    fn clamps_apply_after_first_tick() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(250));
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0).dt, 0.0);
        let ft = clock.tick_at(t0 + Duration::from_secs(1));
        assert_float_eq!(ft.dt, 0.25, abs <= 1e-6);
    }

    #[test]
    fn reset_rebaselines() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        assert_eq!(clock.tick_at(t0 + Duration::from_millis(40)).dt, 0.0);
    }
}
