use crate::draw::model::{Palette, Point, Rect, Rgb};

pub const DEFAULT_COOLDOWN_FRAMES: u32 = 15;

const COLOR_ROW_ORIGIN_X: i32 = 50;
const COLOR_ROW_PITCH: i32 = 120;
const COLOR_BUTTON_WIDTH: i32 = 100;
const COLOR_ROW_Y: (i32, i32) = (20, 60);
const GAME_BUTTON_COLOR: Rgb = Rgb::rgb(0, 200, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    SelectColor(String),
    IncreaseThickness,
    DecreaseThickness,
    Clear,
    Save,
    Load,
    Undo,
    ToggleGame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub rect: Rect,
    pub color: Rgb,
    pub label: String,
    pub action: ActionKind,
}

impl Button {
    fn new(rect: Rect, color: Rgb, label: &str, action: ActionKind) -> Self {
        Self {
            rect,
            color,
            label: label.to_string(),
            action,
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self.action, ActionKind::SelectColor(_))
    }
}

/// Buttons in hit-test order: the quick-palette row first, then the tool
/// column from top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLayout {
    buttons: Vec<Button>,
}

impl ButtonLayout {
    pub fn standard(palette: &Palette) -> Self {
        let mut buttons: Vec<Button> = palette
            .quick()
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let x = COLOR_ROW_ORIGIN_X + idx as i32 * COLOR_ROW_PITCH;
                Button::new(
                    Rect::new(x, COLOR_ROW_Y.0, x + COLOR_BUTTON_WIDTH, COLOR_ROW_Y.1),
                    entry.color,
                    entry.name,
                    ActionKind::SelectColor(entry.name.to_string()),
                )
            })
            .collect();

        let tools = [
            (Rect::new(40, 150, 130, 190), "Clear", ActionKind::Clear),
            (Rect::new(40, 200, 130, 240), "Save", ActionKind::Save),
            (Rect::new(40, 250, 130, 290), "Load", ActionKind::Load),
            (Rect::new(40, 300, 130, 340), "+", ActionKind::IncreaseThickness),
            (Rect::new(40, 350, 130, 390), "-", ActionKind::DecreaseThickness),
            (Rect::new(40, 400, 130, 440), "Undo", ActionKind::Undo),
        ];
        buttons.extend(
            tools
                .into_iter()
                .map(|(rect, label, action)| Button::new(rect, Rgb::GRAY, label, action)),
        );
        buttons.push(Button::new(
            Rect::new(20, 450, 150, 490),
            GAME_BUTTON_COLOR,
            "Start Game",
            ActionKind::ToggleGame,
        ));

        Self { buttons }
    }

    pub fn from_buttons(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// First button in layout order whose rectangle contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<&Button> {
        self.buttons.iter().find(|button| button.rect.contains(point))
    }
}

/// Frame-count debounce. A non-zero value at the start of a frame
/// suppresses dispatch for that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    pub fn remaining(self) -> u32 {
        self.remaining
    }

    pub fn is_active(self) -> bool {
        self.remaining > 0
    }

    pub fn arm(&mut self, frames: u32) {
        self.remaining = frames;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[derive(Debug, Clone)]
pub struct ButtonDispatcher {
    layout: ButtonLayout,
    cooldown: Cooldown,
    cooldown_frames: u32,
    suppressed: bool,
}

impl ButtonDispatcher {
    pub fn new(layout: ButtonLayout, cooldown_frames: u32) -> Self {
        Self {
            layout,
            cooldown: Cooldown::default(),
            cooldown_frames,
            suppressed: false,
        }
    }

    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// Latches whether this frame may dispatch, then decrements the timer.
    /// Must run once per frame, hand or no hand.
    pub fn begin_frame(&mut self) {
        self.suppressed = self.cooldown.is_active();
        self.cooldown.tick();
    }

    pub fn dispatch(&mut self, cursor: Point) -> Option<ActionKind> {
        if self.suppressed {
            return None;
        }
        let action = self.layout.hit_test(cursor)?.action.clone();
        self.cooldown.arm(self.cooldown_frames);
        self.suppressed = true;
        tracing::debug!(?action, x = cursor.0, y = cursor.1, "button dispatched");
        Some(action)
    }
}
