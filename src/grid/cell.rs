//! Cell classification: integer cell code → rendering and walkability.

use std::collections::HashMap;

use crate::types::Color;

pub const OPEN: i32 = 0;
pub const WALL: i32 = 1;
pub const VOID: i32 = 2;
pub const HIDDEN_ROOM: i32 = 3;

/// Golden angle in degrees; spreads generated hues evenly around the wheel.
const GOLDEN_ANGLE: f64 = 137.508;
const GENERATED_SATURATION: f64 = 70.0;
const GENERATED_LIGHTNESS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(RgbFill),
    Hsl { hue: f64, saturation: f64, lightness: f64 },
    Transparent,
    /// Hidden-room fill; the renderer picks the colour from the occupancy toggle.
    Fading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbFill {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Fill {
    const BLACK: Fill = Fill::Solid(RgbFill { r: 0, g: 0, b: 0 });
    const WHITE: Fill = Fill::Solid(RgbFill { r: 255, g: 255, b: 255 });

    /// Terminal colour for this fill, if it paints anything by itself.
    pub fn color(&self) -> Option<Color> {
        match *self {
            Fill::Solid(RgbFill { r, g, b }) => Some(Color::Rgb { r, g, b }),
            Fill::Hsl { hue, saturation, lightness } => {
                Some(Color::from_hsl(hue, saturation, lightness))
            }
            Fill::Transparent | Fill::Fading => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellType {
    pub fill: Fill,
    pub stroke: Option<Color>,
    pub stroke_width: u8,
    pub walkable: bool,
}

impl CellType {
    pub fn has_border(&self) -> bool {
        self.stroke.is_some() && self.stroke_width > 0
    }
}

fn fixed(code: i32) -> Option<CellType> {
    let (fill, walkable) = match code {
        OPEN => (Fill::BLACK, true),
        WALL => (Fill::WHITE, false),
        VOID => (Fill::Transparent, false),
        HIDDEN_ROOM => (Fill::Fading, true),
        _ => return None,
    };
    Some(CellType {
        fill,
        stroke: None,
        stroke_width: 0,
        walkable,
    })
}

fn generated(code: i32) -> CellType {
    let hue = (code as f64 * GOLDEN_ANGLE).rem_euclid(360.0);
    CellType {
        fill: Fill::Hsl {
            hue,
            saturation: GENERATED_SATURATION,
            lightness: GENERATED_LIGHTNESS,
        },
        stroke: Some(Color::WHITE),
        stroke_width: 1,
        walkable: false,
    }
}

/// Source of a classification result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    Fixed(CellType),
    Generated(CellType),
}

impl Classified {
    pub fn cell_type(&self) -> CellType {
        match *self {
            Classified::Fixed(t) | Classified::Generated(t) => t,
        }
    }
}

/// Classifies cell codes, caching the generated types for unknown codes.
#[derive(Debug, Default, Clone)]
pub struct CellClassifier {
    generated: HashMap<i32, CellType>,
}

impl CellClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, code: i32) -> CellType {
        self.lookup(code).cell_type()
    }

    pub fn lookup(&mut self, code: i32) -> Classified {
        if let Some(t) = fixed(code) {
            return Classified::Fixed(t);
        }
        let t = *self.generated.entry(code).or_insert_with(|| {
            log::debug!("generated cell type for code {code}");
            generated(code)
        });
        Classified::Generated(t)
    }

    pub fn is_walkable(&mut self, code: i32) -> bool {
        self.classify(code).walkable
    }

    /// Number of codes that have a cached generated type.
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_and_hidden_room_are_walkable() {
        let mut c = CellClassifier::new();
        assert!(c.is_walkable(OPEN));
        assert!(!c.is_walkable(WALL));
        assert!(!c.is_walkable(VOID));
        assert!(c.is_walkable(HIDDEN_ROOM));
        assert!(!c.is_walkable(4));
        assert!(!c.is_walkable(-7));
    }

    #[test]
    fn fixed_codes_are_not_cached() {
        let mut c = CellClassifier::new();
        for code in 0..4 {
            assert!(matches!(c.lookup(code), Classified::Fixed(_)));
        }
        assert_eq!(c.generated_count(), 0);
    }

    #[test]
    fn generated_hue_uses_golden_angle() {
        let mut c = CellClassifier::new();
        let t = c.classify(5);
        match t.fill {
            Fill::Hsl { hue, saturation, lightness } => {
                assert!((hue - (5.0 * 137.508) % 360.0).abs() < 1e-9);
                assert_eq!(saturation, 70.0);
                assert_eq!(lightness, 50.0);
            }
            other => panic!("unexpected fill {other:?}"),
        }
        assert_eq!(t.stroke, Some(Color::WHITE));
        assert!(t.has_border());
    }

    #[test]
    fn generated_types_are_cached_once() {
        let mut c = CellClassifier::new();
        let a = c.classify(42);
        let b = c.classify(42);
        assert_eq!(a, b);
        assert_eq!(c.generated_count(), 1);
        assert!(matches!(c.lookup(42), Classified::Generated(_)));
    }

    #[test]
    fn fading_and_transparent_have_no_color() {
        let mut c = CellClassifier::new();
        assert_eq!(c.classify(VOID).fill.color(), None);
        assert_eq!(c.classify(HIDDEN_ROOM).fill.color(), None);
        assert_eq!(c.classify(WALL).fill.color(), Some(Color::WHITE));
    }
}
