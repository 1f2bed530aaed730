use rand::SeedableRng;
use rand::rngs::StdRng;

use wisp_curves::{
    AnimationState, ColorParseError, CurveEditor, CurveKind, EditorCommand, Point2, Rgba,
    Visibility,
};

/// Initial editor settings: the values the control panel starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub segments_per_span: u32,

    /// Basis speed `(x, y)`. `None` picks a random starting speed.
    pub speed: Option<(f32, f32)>,

    pub display_lines: bool,
    pub display_points: bool,
    pub animation_enabled: bool,
    pub collisions_enabled: bool,

    /// Curve kind assigned to the next committed capture.
    pub curve_kind: CurveKind,

    /// Seed for commit colours, point sizes and velocities. `None` seeds from
    /// OS entropy.
    pub rng_seed: Option<u64>,

    /// Colour-picker value (`#rrggbb`) applied to the first committed curve.
    pub initial_color: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            segments_per_span: 7,
            speed: None,
            display_lines: true,
            display_points: true,
            animation_enabled: true,
            collisions_enabled: true,
            curve_kind: CurveKind::BSpline,
            rng_seed: None,
            initial_color: None,
        }
    }
}

impl EditorConfig {
    /// Builds an editor in the configured state.
    ///
    /// Fails only when `initial_color` is not a valid `#rrggbb` string.
    pub fn build_editor(&self) -> Result<CurveEditor<StdRng>, ColorParseError> {
        let initial_color = self.initial_color.as_deref().map(Rgba::from_hex).transpose()?;

        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let basis_velocity = match self.speed {
            Some((x, y)) => Point2::new(x, y),
            None => AnimationState::random_basis_velocity(&mut rng),
        };

        let animation = AnimationState {
            basis_velocity,
            segments_per_span: self.segments_per_span,
            collisions_enabled: self.collisions_enabled,
            animation_enabled: self.animation_enabled,
        };
        let visibility = Visibility {
            lines: self.display_lines,
            points: self.display_points,
        };

        let mut editor = CurveEditor::new(animation, visibility, self.curve_kind, rng);
        if let Some(color) = initial_color {
            editor.apply(EditorCommand::SetPendingColor(color));
        }

        Ok(editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use wisp_curves::ColorAssignment;

    #[test]
    fn defaults_match_control_panel() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.segments_per_span, 7);
        assert_eq!(cfg.curve_kind, CurveKind::BSpline);
        assert!(cfg.display_lines && cfg.display_points);
        assert!(cfg.animation_enabled && cfg.collisions_enabled);
        assert_eq!(cfg.speed, None);
    }

    #[test]
    fn random_speed_in_starting_range() {
        let cfg = EditorConfig { rng_seed: Some(11), ..EditorConfig::default() };
        let v = cfg.build_editor().unwrap().animation().basis_velocity;
        assert!((0.01..0.029).contains(&v.x));
        assert!((0.01..0.14).contains(&v.y));
    }

    #[test]
    fn same_seed_same_session() {
        let cfg = EditorConfig { rng_seed: Some(42), ..EditorConfig::default() };
        let a = cfg.build_editor().unwrap();
        let b = cfg.build_editor().unwrap();
        assert_eq!(a.animation().basis_velocity, b.animation().basis_velocity);
    }

    #[test]
    fn explicit_settings_are_applied() {
        let cfg = EditorConfig {
            segments_per_span: 12,
            speed: Some((0.5, 0.25)),
            display_points: false,
            collisions_enabled: false,
            curve_kind: CurveKind::Cardinal,
            rng_seed: Some(1),
            ..EditorConfig::default()
        };
        let editor = cfg.build_editor().unwrap();

        assert_eq!(editor.animation().segments_per_span, 12);
        assert_float_eq!(editor.animation().basis_velocity.x, 0.5, abs <= 1e-6);
        assert!(!editor.animation().collisions_enabled);
        assert!(!editor.visibility().points);
        assert_eq!(editor.kind(), CurveKind::Cardinal);
    }

    #[test]
    fn initial_color_becomes_pending() {
        let cfg = EditorConfig {
            initial_color: Some("#ff8000".into()),
            rng_seed: Some(1),
            ..EditorConfig::default()
        };
        let editor = cfg.build_editor().unwrap();
        match editor.color_assignment() {
            ColorAssignment::Pending(c) => {
                assert_float_eq!(c.r, 1.0, abs <= 1e-6);
                assert_float_eq!(c.g, 128.0 / 255.0, abs <= 1e-6);
                assert_float_eq!(c.b, 0.0, abs <= 1e-6);
            }
            ColorAssignment::Random => panic!("expected pending colour"),
        }
    }

    #[test]
    fn bad_initial_color_is_rejected() {
        let cfg = EditorConfig {
            initial_color: Some("ff8000".into()),
            ..EditorConfig::default()
        };
        assert_eq!(cfg.build_editor().err(), Some(ColorParseError::MissingHash));
    }
}
