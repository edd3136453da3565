use crate::draw::history::StrokeBuffer;
use crate::draw::messages::StatusMessage;
use crate::draw::model::{Point, Rect, Rgb, StrokeEntry};
use crate::draw::toolbar::{ActionKind, ButtonLayout};

const BUTTON_TEXT_SCALE: f32 = 0.6;
const HUD_TEXT_SCALE: f32 = 0.7;
const HINT_TEXT_SCALE: f32 = 0.5;
const STATUS_TEXT_SCALE: f32 = 0.8;
const STATUS_ORIGIN: Point = (200, 100);
const INFO_ORIGIN_Y: i32 = 150;
pub const TARGET_OUTLINE_THICKNESS: u32 = 8;

const INSTRUCTIONS: [&str; 4] = [
    "1 finger: Draw",
    "2 fingers: Finish stroke",
    "3 fingers: Clear all",
    "ESC: Quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Outline(u32),
}

/// Primitive handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Rgb,
        fill: Fill,
    },
    Circle {
        center: Point,
        radius: u32,
        color: Rgb,
        fill: Fill,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        thickness: u32,
    },
    Text {
        origin: Point,
        text: String,
        color: Rgb,
        scale: f32,
    },
}

/// Polylines of the buffer: a filled dot per sample plus a connecting line
/// to the previous sample unless a break sits between them.
pub fn render_strokes(buffer: &StrokeBuffer) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(buffer.len() * 2);
    let mut previous: Option<Point> = None;
    for entry in buffer.entries() {
        match entry {
            StrokeEntry::Sample(sample) => {
                commands.push(DrawCommand::Circle {
                    center: sample.point,
                    radius: sample.thickness / 2,
                    color: sample.color,
                    fill: Fill::Solid,
                });
                if let Some(from) = previous {
                    commands.push(DrawCommand::Line {
                        from,
                        to: sample.point,
                        color: sample.color,
                        thickness: sample.thickness,
                    });
                }
                previous = Some(sample.point);
            }
            StrokeEntry::Break { .. } => previous = None,
        }
    }
    commands
}

pub fn render_brush_preview(fingertip: Point, color: Rgb, thickness: u32) -> DrawCommand {
    DrawCommand::Circle {
        center: fingertip,
        radius: thickness / 2,
        color,
        fill: Fill::Outline(2),
    }
}

pub fn render_target(target: Rect) -> Option<DrawCommand> {
    if target == Rect::ZERO {
        return None;
    }
    Some(DrawCommand::Rect {
        rect: target,
        color: Rgb::WHITE,
        fill: Fill::Outline(TARGET_OUTLINE_THICKNESS),
    })
}

/// Everything the HUD needs from the session for one frame.
#[derive(Debug, Clone, Copy)]
pub struct HudView<'a> {
    pub layout: &'a ButtonLayout,
    pub active_color: Rgb,
    pub thickness: u32,
    pub point_count: usize,
    pub game_active: bool,
    pub status: Option<&'a StatusMessage>,
    pub canvas_height: u32,
}

/// Rough Hershey-simplex metrics; good enough to center labels.
pub fn approx_text_size(text: &str, scale: f32) -> (i32, i32) {
    let glyph_w = (20.0 * scale).round() as i32;
    let glyph_h = (22.0 * scale).round() as i32;
    (glyph_w * text.chars().count() as i32, glyph_h)
}

pub fn render_hud(view: HudView<'_>) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    for button in view.layout.buttons() {
        let rect = button.rect;
        let is_color = button.is_color();

        if is_color && button.color == view.active_color {
            commands.push(DrawCommand::Rect {
                rect: rect.grow(3),
                color: Rgb::GREEN,
                fill: Fill::Outline(3),
            });
        }
        commands.push(DrawCommand::Rect {
            rect,
            color: button.color,
            fill: Fill::Solid,
        });
        commands.push(DrawCommand::Rect {
            rect,
            color: if is_color { Rgb::WHITE } else { Rgb::DARK_GRAY },
            fill: Fill::Outline(2),
        });
        if button.action == ActionKind::ToggleGame && view.game_active {
            commands.push(DrawCommand::Rect {
                rect,
                color: Rgb::GREEN,
                fill: Fill::Outline(4),
            });
        }

        let (text_w, text_h) = approx_text_size(&button.label, BUTTON_TEXT_SCALE);
        let text_color = if is_color && button.color == Rgb::WHITE {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        };
        commands.push(DrawCommand::Text {
            origin: (
                rect.x1 + (rect.width() - text_w) / 2,
                rect.y1 + (rect.height() + text_h) / 2,
            ),
            text: button.label.clone(),
            color: text_color,
            scale: BUTTON_TEXT_SCALE,
        });
    }

    commands.push(DrawCommand::Text {
        origin: (50, INFO_ORIGIN_Y - 20),
        text: format!("Thickness: {}", view.thickness),
        color: Rgb::RED,
        scale: HUD_TEXT_SCALE,
    });
    commands.push(DrawCommand::Text {
        origin: (50, INFO_ORIGIN_Y - 50),
        text: format!("Points: {}", view.point_count),
        color: Rgb::RED,
        scale: HUD_TEXT_SCALE,
    });

    let hints_top = view.canvas_height as i32 - 25 * INSTRUCTIONS.len() as i32 - 5;
    for (idx, hint) in INSTRUCTIONS.iter().enumerate() {
        commands.push(DrawCommand::Text {
            origin: (50, hints_top + idx as i32 * 25),
            text: (*hint).to_string(),
            color: Rgb::LIGHT_GRAY,
            scale: HINT_TEXT_SCALE,
        });
    }

    if let Some(status) = view.status {
        commands.push(DrawCommand::Text {
            origin: STATUS_ORIGIN,
            text: status.text.clone(),
            color: status.color,
            scale: STATUS_TEXT_SCALE,
        });
    }

    commands
}
