use rand::Rng;

use crate::error::ColorParseError;

/// Straight-alpha RGBA colour as uploaded to the curve shader.
///
/// Channels are nominally in `[0, 1]`, but randomly generated curve colours may
/// exceed that range; they are kept as generated and the GPU clamps on output.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Random translucent colour for a freshly committed curve.
    ///
    /// RGB channels land in `[0.061, 1.061)` and alpha in `[0.211, 1.211)`.
    pub fn random_translucent<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(0.0..1.0) + 0.061,
            rng.gen_range(0.0..1.0) + 0.061,
            rng.gen_range(0.0..1.0) + 0.061,
            rng.gen_range(0.0..1.0) + 0.211,
        )
    }

    /// Parses a colour-picker value of the form `#rrggbb` into an opaque colour.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if !digits.is_ascii() {
            return Err(ColorParseError::BadHex(hex.to_string()));
        }
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(digits.len()));
        }

        let channel = |range: core::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorParseError::BadHex(hex.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Which colour the next committed curve receives.
///
/// A colour chosen in the picker while a capture is in progress becomes
/// `Pending` and wins over the random default at commit time. Every commit
/// attempt, successful or not, returns the assignment to `Random`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum ColorAssignment {
    #[default]
    Random,
    Pending(Rgba),
}

impl ColorAssignment {
    /// Colour used for the in-progress preview curve.
    #[inline]
    pub fn preview_color(&self) -> Rgba {
        match self {
            ColorAssignment::Random => Rgba::white(),
            ColorAssignment::Pending(c) => *c,
        }
    }

    /// Consumes the assignment, producing the colour for a committed curve.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Rgba {
        match self {
            ColorAssignment::Random => Rgba::random_translucent(rng),
            ColorAssignment::Pending(c) => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // ── from_hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_parses_to_unit_range() {
        let c = Rgba::from_hex("#b32f2f").unwrap();
        assert_float_eq!(c.r, 179.0 / 255.0, abs <= 1e-6);
        assert_float_eq!(c.g, 47.0 / 255.0, abs <= 1e-6);
        assert_float_eq!(c.b, 47.0 / 255.0, abs <= 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn hex_white() {
        assert_eq!(Rgba::from_hex("#ffffff").unwrap(), Rgba::white());
    }

    #[test]
    fn hex_requires_hash() {
        assert_eq!(Rgba::from_hex("ffffff"), Err(ColorParseError::MissingHash));
    }

    #[test]
    fn hex_rejects_wrong_length() {
        assert_eq!(Rgba::from_hex("#fff"), Err(ColorParseError::BadLength(3)));
    }

    #[test]
    fn hex_rejects_non_hex_digits() {
        assert!(matches!(Rgba::from_hex("#zz0000"), Err(ColorParseError::BadHex(_))));
        assert!(matches!(Rgba::from_hex("#ééé"), Err(ColorParseError::BadHex(_))));
    }

    // ── random colours ────────────────────────────────────────────────────

    #[test]
    fn random_colour_stays_in_generated_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let c = Rgba::random_translucent(&mut rng);
            for ch in [c.r, c.g, c.b] {
                assert!((0.061..1.061).contains(&ch), "channel {ch}");
            }
            assert!((0.211..1.211).contains(&c.a), "alpha {}", c.a);
        }
    }

    // ── ColorAssignment ───────────────────────────────────────────────────

    #[test]
    fn pending_colour_wins_on_resolve() {
        let mut rng = StdRng::seed_from_u64(1);
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(ColorAssignment::Pending(red).resolve(&mut rng), red);
    }

    #[test]
    fn preview_defaults_to_white() {
        assert_eq!(ColorAssignment::Random.preview_color(), Rgba::white());
        let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(ColorAssignment::Pending(blue).preview_color(), blue);
    }
}
