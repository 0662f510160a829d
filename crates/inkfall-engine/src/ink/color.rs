use super::rng::Rng;

/// RGBA color (0.0 - 1.0) shared by ink, colliders and particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert from HSL: hue in degrees, saturation and lightness in percent.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self::rgb(r + m, g + m, b + m)
    }

    /// Random color in the site's cyan/blue band: hue 180-220,
    /// saturation 80-95%, lightness 45-60%.
    pub fn random_ink(rng: &mut Rng) -> Self {
        let hue = rng.range(180.0, 220.0);
        let saturation = rng.range(80.0, 95.0);
        let lightness = rng.range(45.0, 60.0);
        Self::from_hsl(hue, saturation, lightness)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Flag glyph and marble accent (#11C3DB).
    pub const ACCENT: Self = Self::rgb(17.0 / 255.0, 195.0 / 255.0, 219.0 / 255.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for InkColor {
    fn default() -> Self {
        Self::ACCENT
    }
}
