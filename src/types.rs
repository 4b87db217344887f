//! Shared boundary types for the maze and room screens.
//!
//! This module defines the two key data contracts:
//! - Scene → Renderer (in-memory): `DrawOp`s resolved through a projection
//! - Renderer → Terminal / recording file: `Frame`s of styled cells

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb { r: 255, g: 255, b: 255 };

    /// Convert an HSL triple (hue in degrees, saturation and lightness in
    /// percent) to an RGB colour.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::Rgb {
            r: to_byte(r1),
            g: to_byte(g1),
            b: to_byte(b1),
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dim: bool,
}

impl Style {
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold && !self.dim
    }

    pub fn fg(color: Color) -> Self {
        Style {
            fg: Some(color),
            ..Style::default()
        }
    }

    pub fn bg(color: Color) -> Self {
        Style {
            bg: Some(color),
            ..Style::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Scene → Renderer boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

/// One terminal cell write. An op without a background inherits the
/// background painted by lower layers.
#[derive(Debug, Clone)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
}

// ---------------------------------------------------------------------------
// Renderer → Terminal boundary (also serialized into recordings)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    #[serde(default, skip_serializing_if = "Style::is_default")]
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub frame_index: usize,
    pub label: String,
}

/// A headless capture of the maze screen: one full frame followed by diffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub contract: TerminalContract,
    pub frames: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 100.0, 50.0), Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0), Color::Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(Color::from_hsl(240.0, 100.0, 50.0), Color::Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(Color::from_hsl(0.0, 0.0, 100.0), Color::WHITE);
    }

    #[test]
    fn default_cell_style_is_omitted_from_json() {
        let json = serde_json::to_string(&Cell::default()).unwrap();
        assert_eq!(json, r#"{"ch":" "}"#);
    }
}
