use std::collections::{BTreeMap, BTreeSet};

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
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

/// `#rrggbb`, the form both Plotly and [`parse_hex`] understand.
pub fn to_hex(c: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

/// Parse a `#rrggbb` string back into its components.
pub fn parse_hex(s: &str) -> Option<Srgb<u8>> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

// ---------------------------------------------------------------------------
// Color mapping: category → colour
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Srgb<u8>>,
}

impl ColorMap {
    /// Build a colour map from the sorted set of categories.
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a category as `#rrggbb`. Unknown categories
    /// are neutral grey.
    pub fn hex_for(&self, category: &str) -> String {
        let color = self
            .mapping
            .get(category)
            .copied()
            .unwrap_or_else(|| Srgb::new(128, 128, 128));
        to_hex(color)
    }
}
