//! Marker appearance tables and engine configuration

use serde::{Deserialize, Serialize};

/// Shape of a marker glyph.
///
/// Rendered as a vector symbol by the [`crate::render`] module; the glyph
/// character is what a text-based UI shows on its picker buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Cross,
    Triangle,
    UpArrow,
    RightArrow,
    DownArrow,
    LeftArrow,
}

impl MarkerShape {
    /// All shapes, in picker order.
    pub const ALL: [MarkerShape; 8] = [
        MarkerShape::Circle,
        MarkerShape::Square,
        MarkerShape::Cross,
        MarkerShape::Triangle,
        MarkerShape::UpArrow,
        MarkerShape::RightArrow,
        MarkerShape::DownArrow,
        MarkerShape::LeftArrow,
    ];

    /// Glyph character for picker buttons and text renderings.
    pub fn glyph(self) -> char {
        match self {
            MarkerShape::Circle => '●',
            MarkerShape::Square => '■',
            MarkerShape::Cross => '✖',
            MarkerShape::Triangle => '▲',
            MarkerShape::UpArrow => '↑',
            MarkerShape::RightArrow => '→',
            MarkerShape::DownArrow => '↓',
            MarkerShape::LeftArrow => '←',
        }
    }
}

/// Color of a marker, from the fixed eight-color palette the UI exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerColor {
    #[default]
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Black,
    White,
}

impl MarkerColor {
    /// All colors, in picker order.
    pub const ALL: [MarkerColor; 8] = [
        MarkerColor::Red,
        MarkerColor::Green,
        MarkerColor::Blue,
        MarkerColor::Yellow,
        MarkerColor::Magenta,
        MarkerColor::Cyan,
        MarkerColor::Black,
        MarkerColor::White,
    ];

    /// Convert to image crate RGBA format (0-255), fully opaque.
    pub fn to_rgba_u8(self) -> [u8; 4] {
        match self {
            MarkerColor::Red => [255, 0, 0, 255],
            MarkerColor::Green => [0, 255, 0, 255],
            MarkerColor::Blue => [0, 0, 255, 255],
            MarkerColor::Yellow => [255, 255, 0, 255],
            MarkerColor::Magenta => [255, 0, 255, 255],
            MarkerColor::Cyan => [0, 255, 255, 255],
            MarkerColor::Black => [0, 0, 0, 255],
            MarkerColor::White => [255, 255, 255, 255],
        }
    }
}

/// Engine configuration.
///
/// All lengths are in view pixels: glyphs keep a constant on-screen size
/// regardless of zoom, so hit radii are converted to scene units at the
/// current transform before hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// On-screen glyph extent in view pixels (width and height).
    pub glyph_size: f32,
    /// Click hit radius around a marker, in view pixels.
    pub hit_radius: f32,
    /// Pointer movement before a press counts as a drag instead of a
    /// click, in view pixels. Interpreted by the UI layer, not the core;
    /// zero means any detectable movement is a drag.
    pub drag_threshold: f32,
    /// Shape assigned to newly created markers.
    pub default_shape: MarkerShape,
    /// Color assigned to newly created markers.
    pub default_color: MarkerColor,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // 24 px glyph with a hit radius of half its extent
            glyph_size: 24.0,
            hit_radius: 12.0,
            drag_threshold: 0.0,
            default_shape: MarkerShape::Circle,
            default_color: MarkerColor::Red,
        }
    }
}
