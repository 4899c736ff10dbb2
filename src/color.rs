//! Colors and the fixed table palettes
//!
//! Planet `i` is tied to palette slot `i` in every table below. A ball "carries" planet `i`
//! when its primary color equals `BALL_COLORS[i]`.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(0xFF, 0xFF, 0xFF);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other` by `fraction` (0 = self, 1 = other)
    pub fn blended_with(&self, other: Color, fraction: f32) -> Color {
        let fraction = fraction.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * fraction;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::from_rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Number of palette slots (and so the maximum planet count)
pub const PALETTE_SIZE: usize = 5;

/// Planet body colors
pub const PLANET_COLORS: [Color; PALETTE_SIZE] = [
    Color::from_rgb(0xFF, 0x55, 0x00),
    Color::from_rgb(0x00, 0x99, 0xFF),
    Color::from_rgb(0x99, 0x00, 0x00),
    Color::from_rgb(0x00, 0xAA, 0x66),
    Color::from_rgb(0xAA, 0x22, 0xCC),
];

/// Ball primary colors after collecting a planet
pub const BALL_COLORS: [Color; PALETTE_SIZE] = [
    Color::from_rgb(0xFF, 0x99, 0x44),
    Color::from_rgb(0x77, 0xCC, 0xFF),
    Color::from_rgb(0xCC, 0x66, 0x66),
    Color::from_rgb(0x77, 0xCC, 0xAA),
    Color::from_rgb(0xCC, 0x88, 0xEE),
];

/// Ball secondary colors after collecting a planet
pub const BALL_SECONDARY_COLORS: [Color; PALETTE_SIZE] = [
    Color::from_rgb(0xCC, 0x77, 0x22),
    Color::from_rgb(0x55, 0xAA, 0xCC),
    Color::from_rgb(0xAA, 0x44, 0x44),
    Color::from_rgb(0x55, 0xAA, 0x88),
    Color::from_rgb(0xAA, 0x66, 0xCC),
];

/// Palette slot of a ball primary color, if it belongs to one
pub fn ball_palette_index(color: Color) -> Option<usize> {
    BALL_COLORS.iter().position(|c| *c == color)
}
