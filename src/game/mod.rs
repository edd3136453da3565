pub mod ranking;
pub mod scoring;

use crate::draw::history::StrokeBuffer;
use crate::draw::model::Rect;
use scoring::{ScoreMasks, ScoreParams, SimilarityScore};

/// Tracing-game state. Inactive → toggle → active (empty buffer) → scored
/// → toggle → inactive. There is no paused state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    active: bool,
    target_bounds: Rect,
    tolerance_margin: u32,
    similarity_threshold: f64,
    last_score: Option<SimilarityScore>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(
            scoring::DEFAULT_TOLERANCE_MARGIN,
            scoring::DEFAULT_SIMILARITY_THRESHOLD,
        )
    }
}

impl GameSession {
    pub fn new(tolerance_margin: u32, similarity_threshold: f64) -> Self {
        Self {
            active: false,
            target_bounds: Rect::ZERO,
            tolerance_margin,
            similarity_threshold: similarity_threshold.clamp(0.0, 1.0),
            last_score: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target_bounds(&self) -> Rect {
        self.target_bounds
    }

    pub fn tolerance_margin(&self) -> u32 {
        self.tolerance_margin
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    pub fn last_score(&self) -> Option<SimilarityScore> {
        self.last_score
    }

    /// Flips the game on or off and returns the new state. The caller owns
    /// the stroke buffer and clears it on both edges.
    pub fn toggle(&mut self, canvas: (u32, u32)) -> bool {
        self.active = !self.active;
        self.last_score = None;
        self.target_bounds = if self.active {
            scoring::target_shape(canvas.0, canvas.1)
        } else {
            Rect::ZERO
        };
        tracing::info!(
            active = self.active,
            target = ?self.target_bounds,
            "tracing game toggled"
        );
        self.active
    }

    pub fn score(
        &mut self,
        buffer: &StrokeBuffer,
        canvas: (u32, u32),
        pen_thickness: u32,
    ) -> (SimilarityScore, ScoreMasks) {
        let (result, masks) = scoring::score(
            buffer,
            ScoreParams {
                canvas,
                target: self.target_bounds,
                pen_thickness,
                tolerance_margin: self.tolerance_margin,
                threshold: self.similarity_threshold,
            },
        );
        self.last_score = Some(result);
        tracing::info!(
            similarity = result.similarity,
            passes = result.passes,
            "stroke scored"
        );
        (result, masks)
    }

    pub fn reset_score(&mut self) {
        self.last_score = None;
    }
}
