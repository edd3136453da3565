use serde::{Deserialize, Serialize};

pub type Point = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GRAY: Self = Self::rgb(50, 50, 50);
    pub const LIGHT_GRAY: Self = Self::rgb(200, 200, 200);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(color: [u8; 3]) -> Self {
        Self::rgb(color[0], color[1], color[2])
    }
}

/// Axis-aligned rectangle given by its two corners `(x1, y1)`–`(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Strict interior test; points on the border do not count.
    pub fn contains(self, point: Point) -> bool {
        self.x1 < point.0 && point.0 < self.x2 && self.y1 < point.1 && point.1 < self.y2
    }

    pub fn is_degenerate(self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    pub fn grow(self, by: i32) -> Self {
        Self::new(self.x1 - by, self.y1 - by, self.x2 + by, self.y2 + by)
    }

    pub fn width(self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(self) -> i32 {
        self.y2 - self.y1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeSample {
    pub point: Point,
    pub color: Rgb,
    pub thickness: u32,
}

/// One entry of the stroke buffer. A `Break` ends the current polyline; it
/// keeps the style that was active when the pen lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEntry {
    Sample(StrokeSample),
    Break { color: Rgb, thickness: u32 },
}

impl StrokeEntry {
    pub fn is_break(&self) -> bool {
        matches!(self, StrokeEntry::Break { .. })
    }

    pub fn sample(&self) -> Option<&StrokeSample> {
        match self {
            StrokeEntry::Sample(sample) => Some(sample),
            StrokeEntry::Break { .. } => None,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            StrokeEntry::Sample(sample) => sample.color,
            StrokeEntry::Break { color, .. } => *color,
        }
    }

    pub fn thickness(&self) -> u32 {
        match self {
            StrokeEntry::Sample(sample) => sample.thickness,
            StrokeEntry::Break { thickness, .. } => *thickness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Rgb,
}

const DEFAULT_COLORS: [NamedColor; 8] = [
    NamedColor { name: "Red", color: Rgb::rgb(255, 0, 0) },
    NamedColor { name: "Green", color: Rgb::rgb(0, 255, 0) },
    NamedColor { name: "Blue", color: Rgb::rgb(0, 0, 255) },
    NamedColor { name: "Black", color: Rgb::rgb(0, 0, 0) },
    NamedColor { name: "White", color: Rgb::rgb(255, 255, 255) },
    NamedColor { name: "Yellow", color: Rgb::rgb(255, 255, 0) },
    NamedColor { name: "Pink", color: Rgb::rgb(255, 0, 255) },
    NamedColor { name: "Cyan", color: Rgb::rgb(0, 255, 255) },
];

pub const QUICK_PALETTE_LEN: usize = 6;

/// Fixed name → color mapping for a session. Order is significant: the
/// first [`QUICK_PALETTE_LEN`] entries get a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<NamedColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.colors
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.color)
    }

    pub fn name_of(&self, color: Rgb) -> Option<&'static str> {
        self.colors
            .iter()
            .find(|entry| entry.color == color)
            .map(|entry| entry.name)
    }

    pub fn quick(&self) -> &[NamedColor] {
        &self.colors[..QUICK_PALETTE_LEN.min(self.colors.len())]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn first(&self) -> Rgb {
        self.colors.first().map(|entry| entry.color).unwrap_or(Rgb::RED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_strict() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains((15, 15)));
        assert!(!rect.contains((10, 15)));
        assert!(!rect.contains((15, 20)));
    }

    #[test]
    fn palette_quick_subset_is_first_six() {
        let palette = Palette::default();
        let quick: Vec<&str> = palette.quick().iter().map(|c| c.name).collect();
        assert_eq!(quick, ["Red", "Green", "Blue", "Black", "White", "Yellow"]);
        assert_eq!(palette.get("Cyan"), Some(Rgb::rgb(0, 255, 255)));
        assert_eq!(palette.name_of(Rgb::rgb(255, 0, 255)), Some("Pink"));
    }
}
