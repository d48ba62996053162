use std::fmt;

use palette::{Hsl, IntoColor, Srgb};
use serde::Deserialize;

/// 8-bit sRGB colour as written into the SVG.
pub type Rgb8 = Srgb<u8>;

// ---------------------------------------------------------------------------
// Categorical palettes
// ---------------------------------------------------------------------------

/// The classic ten-colour categorical scheme.
const CATEGORY10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

const TABLEAU10: [(u8, u8, u8); 10] = [
    (0x4e, 0x79, 0xa7),
    (0xf2, 0x8e, 0x2b),
    (0xe1, 0x57, 0x59),
    (0x76, 0xb7, 0xb2),
    (0x59, 0xa1, 0x4f),
    (0xed, 0xc9, 0x48),
    (0xb0, 0x7a, 0xa1),
    (0xff, 0x9d, 0xa7),
    (0x9c, 0x75, 0x5f),
    (0xba, 0xb0, 0xac),
];

const FALLBACK: (u8, u8, u8) = (0xa0, 0xa0, 0xa0);

/// Which colours the department scale cycles through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteName {
    #[default]
    Category10,
    Tableau10,
    /// Ten evenly spaced hues.
    Hues,
}

impl PaletteName {
    pub fn colors(self) -> Vec<Rgb8> {
        let rgb = |&(r, g, b): &(u8, u8, u8)| Srgb::new(r, g, b);
        match self {
            PaletteName::Category10 => CATEGORY10.iter().map(rgb).collect(),
            PaletteName::Tableau10 => TABLEAU10.iter().map(rgb).collect(),
            PaletteName::Hues => generate_palette(10),
        }
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// `#rrggbb` form used in SVG `fill` attributes.
pub fn to_hex(color: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Ordinal scale: department → colour
// ---------------------------------------------------------------------------

/// Maps department names to palette colours in domain order, cycling the
/// palette when there are more departments than colours.
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Vec<Rgb8>,
    unknown: Rgb8,
}

impl OrdinalScale {
    /// Build the scale from keys in first-use order. Duplicates keep their
    /// first position.
    pub fn new<I, S>(keys: I, palette: Vec<Rgb8>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domain: Vec<String> = Vec::new();
        for key in keys {
            let key = key.as_ref();
            if !domain.iter().any(|k| k == key) {
                domain.push(key.to_string());
            }
        }
        let (r, g, b) = FALLBACK;
        OrdinalScale {
            domain,
            palette,
            unknown: Srgb::new(r, g, b),
        }
    }

    /// Look up the colour for a department. Keys outside the domain get the
    /// neutral fallback colour.
    pub fn color_for(&self, key: &str) -> Rgb8 {
        match self.domain.iter().position(|k| k == key) {
            Some(idx) if !self.palette.is_empty() => self.palette[idx % self.palette.len()],
            _ => self.unknown,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Legend entries (department → colour) in domain order.
    pub fn legend_entries(&self) -> Vec<(String, Rgb8)> {
        self.domain
            .iter()
            .map(|k| (k.clone(), self.color_for(k)))
            .collect()
    }
}

impl fmt::Display for OrdinalScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .legend_entries()
            .into_iter()
            .map(|(k, c)| format!("{k}={}", to_hex(c)))
            .collect();
        write!(f, "[{}]", entries.join(", "))
    }
}
