use crate::draw::history::StrokeBuffer;
use crate::draw::input::Smoother;
use crate::draw::messages::{FrameInput, HandSample, Shortcut, StatusMessage};
use crate::draw::model::{Palette, Point, Rgb};
use crate::draw::render::{self, DrawCommand, HudView};
use crate::draw::save;
use crate::draw::state::{self, Gesture, PenEffect, PenState, TransitionGuards};
use crate::draw::toolbar::{ActionKind, ButtonDispatcher, ButtonLayout};
use crate::game::ranking;
use crate::game::scoring::{ScoreMasks, SimilarityScore};
use crate::game::GameSession;
use crate::settings::{AppSettings, MAX_THICKNESS, MIN_THICKNESS, THICKNESS_STEP};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Everything produced by one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutput {
    /// Camera-space commands: strokes, brush preview and target outline.
    pub scene: Vec<DrawCommand>,
    /// Screen-space commands drawn after mirroring: buttons, HUD, status.
    pub overlay: Vec<DrawCommand>,
    /// Masks of a scoring attempt made during this frame.
    pub masks: Option<ScoreMasks>,
    pub status: Option<StatusMessage>,
    pub quit: bool,
}

/// Owns all session state and advances it one input sample at a time.
pub struct SessionController {
    settings: AppSettings,
    palette: Palette,
    dispatcher: ButtonDispatcher,
    buffer: StrokeBuffer,
    smoother: Smoother,
    pen: PenState,
    active_color: Rgb,
    thickness: u32,
    game: GameSession,
    status: Option<StatusMessage>,
    last_masks: Option<ScoreMasks>,
}

impl SessionController {
    pub fn new(settings: AppSettings) -> Self {
        let mut settings = settings;
        settings.sanitize();
        let palette = Palette::default();
        let dispatcher = ButtonDispatcher::new(
            ButtonLayout::standard(&palette),
            settings.button_cooldown_frames,
        );
        let game = GameSession::new(settings.tolerance_margin, settings.similarity_threshold);
        Self {
            active_color: palette.first(),
            thickness: settings.default_thickness,
            palette,
            dispatcher,
            buffer: StrokeBuffer::new(),
            smoother: Smoother::default(),
            pen: PenState::Idle,
            game,
            status: None,
            last_masks: None,
            settings,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn dispatcher(&self) -> &ButtonDispatcher {
        &self.dispatcher
    }

    pub fn buffer(&self) -> &StrokeBuffer {
        &self.buffer
    }

    pub fn pen_state(&self) -> PenState {
        self.pen
    }

    pub fn active_color(&self) -> Rgb {
        self.active_color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn last_masks(&self) -> Option<&ScoreMasks> {
        self.last_masks.as_ref()
    }

    /// Advances the session by one frame. A frame without a hand only ticks
    /// the cooldown; a Quit shortcut stops before the hand is looked at.
    pub fn process_frame(&mut self, input: FrameInput) -> FrameOutput {
        self.dispatcher.begin_frame();

        if let Some(shortcut) = input.shortcut {
            if self.handle_shortcut(shortcut) {
                let mut output = self.compose(None, None);
                output.quit = true;
                return output;
            }
        }

        let mut masks = None;
        if let Some(hand) = input.hand {
            masks = self.handle_hand(hand);
        }
        let fingertip = input
            .hand
            .filter(|_| self.pen == PenState::Drawing)
            .map(|hand| hand.fingertip());
        self.compose(fingertip, masks)
    }

    /// Returns `true` when the shortcut asks to quit.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        tracing::debug!(?shortcut, "shortcut");
        let action = match shortcut {
            Shortcut::Quit => return true,
            Shortcut::Save => ActionKind::Save,
            Shortcut::Load => ActionKind::Load,
            Shortcut::ClearAll => ActionKind::Clear,
            Shortcut::Undo => ActionKind::Undo,
            Shortcut::ToggleGame => ActionKind::ToggleGame,
        };
        self.apply_action(action);
        false
    }

    pub fn apply_action(&mut self, action: ActionKind) {
        match action {
            ActionKind::SelectColor(name) => match self.palette.get(&name) {
                Some(color) => {
                    self.active_color = color;
                    tracing::debug!(color = %name, "color selected");
                }
                None => tracing::warn!(color = %name, "unknown palette color"),
            },
            ActionKind::IncreaseThickness => {
                self.thickness = (self.thickness + THICKNESS_STEP).min(MAX_THICKNESS);
                tracing::debug!(thickness = self.thickness, "thickness increased");
            }
            ActionKind::DecreaseThickness => {
                self.thickness = self
                    .thickness
                    .saturating_sub(THICKNESS_STEP)
                    .max(MIN_THICKNESS);
                tracing::debug!(thickness = self.thickness, "thickness decreased");
            }
            ActionKind::Clear => self.clear_strokes(),
            ActionKind::Save => self.save(),
            ActionKind::Load => self.load(),
            ActionKind::Undo => self.undo(),
            ActionKind::ToggleGame => self.toggle_game(),
        }
    }

    fn handle_hand(&mut self, hand: HandSample) -> Option<ScoreMasks> {
        let fingertip = hand.fingertip();
        let cursor = self.button_space(fingertip);
        if let Some(action) = self.dispatcher.dispatch(cursor) {
            self.apply_action(action);
        }

        let guards = TransitionGuards {
            game_active: self.game.is_active(),
            buffer_empty: self.buffer.is_empty(),
        };
        let (next, effect) =
            state::next_state(self.pen, Gesture::from_fingers(hand.fingers_up), guards);
        if next != self.pen {
            tracing::debug!(from = ?self.pen, to = ?next, ?effect, "pen state");
        }
        self.pen = next;

        match effect {
            PenEffect::RecordPoint => {
                for point in self.smoother.feed(fingertip) {
                    self.buffer
                        .append_sample(point, self.active_color, self.thickness);
                }
                None
            }
            PenEffect::ClearAll => {
                self.clear_strokes();
                None
            }
            PenEffect::LiftPen => {
                self.buffer.append_break(self.active_color, self.thickness);
                self.smoother.reset();
                None
            }
            PenEffect::Score => Some(self.score_attempt()),
            PenEffect::None => None,
        }
    }

    /// Buttons are laid out in the mirrored image the operator sees.
    fn button_space(&self, fingertip: Point) -> Point {
        if self.settings.mirror_input {
            let width = i32::try_from(self.settings.canvas_width).unwrap_or(i32::MAX);
            (width.saturating_sub(fingertip.0), fingertip.1)
        } else {
            fingertip
        }
    }

    fn score_attempt(&mut self) -> ScoreMasks {
        let (result, masks) =
            self.game
                .score(&self.buffer, self.settings.canvas(), self.thickness);
        self.status = Some(result.status_message());

        if let Some(dir) = self.settings.mask_snapshot_dir.clone() {
            if let Err(err) = write_mask_snapshots(&dir, &masks) {
                tracing::warn!(error = ?err, "failed to write mask snapshots");
            }
        }
        if let Some(player) = self.settings.player_name.clone() {
            self.commit_ranking(&player, result);
        }

        self.last_masks = Some(masks.clone());
        masks
    }

    fn commit_ranking(&mut self, player: &str, result: SimilarityScore) {
        let path = self.settings.ranking_path();
        match ranking::commit_score(&path, player, result.similarity) {
            Ok(table) => {
                tracing::info!(
                    player,
                    best = table.best_for(player),
                    position = table.position_of(player),
                    "ranking updated"
                );
            }
            Err(err) => {
                tracing::warn!(error = ?err, path = %path.display(), "failed to update ranking");
                let score = result.status_message().text;
                self.status = Some(StatusMessage::failure(format!(
                    "{score}, ranking not saved"
                )));
            }
        }
    }

    fn clear_strokes(&mut self) {
        self.buffer.clear();
        self.reset_pen();
        self.game.reset_score();
        self.last_masks = None;
        tracing::debug!("strokes cleared");
    }

    fn undo(&mut self) {
        if self.game.is_active() {
            // A traced attempt is a single unit.
            self.clear_strokes();
            return;
        }
        let removed = self.buffer.undo_last_stroke();
        self.reset_pen();
        tracing::debug!(removed, "undo");
    }

    fn toggle_game(&mut self) {
        self.game.toggle(self.settings.canvas());
        self.buffer.clear();
        self.reset_pen();
        self.last_masks = None;
        self.status = None;
    }

    fn save(&mut self) {
        match save::save_drawing(self.settings.drawing_dir(), &self.buffer, Local::now()) {
            Ok(Some(path)) => {
                tracing::info!(path = %path.display(), entries = self.buffer.len(), "drawing saved");
                self.status = Some(StatusMessage::success(format!(
                    "Saved {}",
                    display_name(&path)
                )));
            }
            Ok(None) => {
                tracing::info!("nothing to save");
                self.status = Some(StatusMessage::info("Nothing to save"));
            }
            Err(err) => {
                tracing::warn!(error = ?err, "failed to save drawing");
                self.status = Some(StatusMessage::failure("Save failed"));
            }
        }
    }

    fn load(&mut self) {
        match save::load_latest(self.settings.drawing_dir()) {
            Ok(Some((path, buffer))) => {
                tracing::info!(path = %path.display(), entries = buffer.len(), "drawing loaded");
                self.buffer.replace(buffer);
                self.reset_pen();
                self.status = Some(StatusMessage::success(format!(
                    "Loaded {}",
                    display_name(&path)
                )));
            }
            Ok(None) => {
                tracing::info!("no saved drawing found");
                self.status = Some(StatusMessage::failure("No saved drawing found"));
            }
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load drawing");
                self.status = Some(StatusMessage::failure("Load failed"));
            }
        }
    }

    fn reset_pen(&mut self) {
        self.smoother.reset();
        self.pen = PenState::Idle;
    }

    fn compose(&self, fingertip: Option<Point>, masks: Option<ScoreMasks>) -> FrameOutput {
        let mut scene = render::render_strokes(&self.buffer);
        if self.game.is_active() {
            scene.extend(render::render_target(self.game.target_bounds()));
        }
        if let Some(fingertip) = fingertip {
            scene.push(render::render_brush_preview(
                fingertip,
                self.active_color,
                self.thickness,
            ));
        }

        let overlay = render::render_hud(HudView {
            layout: self.dispatcher.layout(),
            active_color: self.active_color,
            thickness: self.thickness,
            point_count: self.buffer.len(),
            game_active: self.game.is_active(),
            status: self.status.as_ref(),
            canvas_height: self.settings.canvas_height,
        });

        FrameOutput {
            scene,
            overlay,
            masks,
            status: self.status.clone(),
            quit: false,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Writes `mask_target_<stamp>.png` and `mask_stroke_<stamp>.png`.
pub fn write_mask_snapshots(dir: &Path, masks: &ScoreMasks) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create mask snapshot folder {}", dir.display()))?;
    let stamp = save::timestamped_stem(Local::now());
    let target = dir.join(format!("mask_target_{stamp}.png"));
    let stroke = dir.join(format!("mask_stroke_{stamp}.png"));
    masks.target.save_png(&target)?;
    masks.stroke.save_png(&stroke)?;
    tracing::debug!(target = %target.display(), stroke = %stroke.display(), "mask snapshots written");
    Ok((target, stroke))
}
