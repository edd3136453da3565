use crate::draw::model::{Point, Rgb};
use serde::{Deserialize, Serialize};

/// Fingertip coordinates are clamped to `-COORDINATE_LIMIT..=COORDINATE_LIMIT`.
pub const COORDINATE_LIMIT: i32 = 1 << 15;

/// What the hand-pose collaborator reports for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSample {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "fingers")]
    pub fingers_up: u8,
}

impl HandSample {
    pub fn new(fingertip: Point, fingers_up: u8) -> Self {
        Self {
            x: fingertip.0.clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT),
            y: fingertip.1.clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT),
            fingers_up: fingers_up.min(5),
        }
    }

    pub fn fingertip(&self) -> Point {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    Save,
    Load,
    ClearAll,
    Undo,
    Quit,
    ToggleGame,
}

impl Shortcut {
    pub const ESCAPE: char = '\u{1b}';

    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(Shortcut::Save),
            'l' => Some(Shortcut::Load),
            'c' => Some(Shortcut::ClearAll),
            'z' => Some(Shortcut::Undo),
            'g' => Some(Shortcut::ToggleGame),
            Self::ESCAPE => Some(Shortcut::Quit),
            _ => None,
        }
    }

    /// Accepts either a single key (`"s"`) or the shortcut name
    /// (`"save"`, `"toggle_game"`, `"esc"`).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            return Self::from_key(key.to_ascii_lowercase());
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "save" => Some(Shortcut::Save),
            "load" => Some(Shortcut::Load),
            "clear" | "clear_all" => Some(Shortcut::ClearAll),
            "undo" => Some(Shortcut::Undo),
            "quit" | "esc" | "escape" => Some(Shortcut::Quit),
            "game" | "toggle_game" => Some(Shortcut::ToggleGame),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub hand: Option<HandSample>,
    pub shortcut: Option<Shortcut>,
}

impl FrameInput {
    pub fn hand(fingertip: Point, fingers_up: u8) -> Self {
        Self {
            hand: Some(HandSample::new(fingertip, fingers_up)),
            shortcut: None,
        }
    }

    pub fn shortcut(shortcut: Shortcut) -> Self {
        Self {
            hand: None,
            shortcut: Some(shortcut),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Operator-facing line of text, colored by outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub color: Rgb,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Rgb::WHITE,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Rgb::GREEN,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Rgb::RED,
        }
    }
}
