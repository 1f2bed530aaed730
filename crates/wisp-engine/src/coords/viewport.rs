use super::Vec2;

/// Drawable size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a window-space position to NDC.
    ///
    /// `x_ndc = x / w * 2 - 1`, `y_ndc = -(y / h * 2 - 1)`. Returns `None` for a
    /// degenerate viewport (minimized window).
    #[inline]
    pub fn to_ndc(self, pos: Vec2) -> Option<Vec2> {
        if !self.is_valid() {
            return None;
        }
        Some(Vec2::new(
            pos.x / self.width * 2.0 - 1.0,
            -(pos.y / self.height * 2.0 - 1.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn corners_map_to_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);

        let tl = vp.to_ndc(Vec2::new(0.0, 0.0)).unwrap();
        assert_float_eq!(tl.x, -1.0, abs <= 1e-6);
        assert_float_eq!(tl.y, 1.0, abs <= 1e-6);

        let br = vp.to_ndc(Vec2::new(800.0, 600.0)).unwrap();
        assert_float_eq!(br.x, 1.0, abs <= 1e-6);
        assert_float_eq!(br.y, -1.0, abs <= 1e-6);
    }

    #[test]
    fn center_maps_to_origin() {
        let p = Viewport::new(1024.0, 768.0).to_ndc(Vec2::new(512.0, 384.0)).unwrap();
        assert_float_eq!(p.x, 0.0, abs <= 1e-6);
        assert_float_eq!(p.y, 0.0, abs <= 1e-6);
    }

    #[test]
    fn y_axis_is_flipped() {
        let vp = Viewport::new(100.0, 100.0);
        let upper = vp.to_ndc(Vec2::new(50.0, 25.0)).unwrap();
        let lower = vp.to_ndc(Vec2::new(50.0, 75.0)).unwrap();
        assert!(upper.y > lower.y);
        assert_float_eq!(upper.y, 0.5, abs <= 1e-6);
    }

    #[test]
    fn degenerate_viewport_has_no_mapping() {
        assert!(Viewport::new(0.0, 600.0).to_ndc(Vec2::zero()).is_none());
        assert!(Viewport::new(800.0, f32::NAN).to_ndc(Vec2::zero()).is_none());
    }
}
