use crate::draw::history::StrokeBuffer;
use crate::draw::mask::Mask;
use crate::draw::messages::StatusMessage;
use crate::draw::model::{Point, Rect, StrokeEntry};

pub const TARGET_SIZE: i32 = 300;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;
pub const DEFAULT_TOLERANCE_MARGIN: u32 = 5;

/// Centered `TARGET_SIZE` square, or [`Rect::ZERO`] when the canvas cannot
/// hold it.
pub fn target_shape(canvas_width: u32, canvas_height: u32) -> Rect {
    let (width, height) = (canvas_width as i64, canvas_height as i64);
    if width < TARGET_SIZE as i64 || height < TARGET_SIZE as i64 {
        return Rect::ZERO;
    }
    let cx = (width / 2) as i32;
    let cy = (height / 2) as i32;
    let half = TARGET_SIZE / 2;
    Rect::new(cx - half, cy - half, cx + half, cy + half)
}

/// Outline of the target widened by the tolerance margin. A degenerate
/// target yields an empty mask.
pub fn target_mask(
    width: u32,
    height: u32,
    target: Rect,
    pen_thickness: u32,
    tolerance_margin: u32,
) -> Mask {
    let mut mask = Mask::new(width, height);
    if target != Rect::ZERO {
        mask.stroke_rect(target, pen_thickness + tolerance_margin);
    }
    mask
}

/// Every drawn pixel of the buffer regardless of color.
pub fn stroke_mask(buffer: &StrokeBuffer, width: u32, height: u32) -> Mask {
    let mut mask = Mask::new(width, height);
    let mut previous: Option<Point> = None;
    for entry in buffer.entries() {
        match entry {
            StrokeEntry::Sample(sample) => {
                mask.fill_circle(sample.point, sample.thickness / 2);
                if let Some(from) = previous {
                    mask.stroke_segment(from, sample.point, sample.thickness);
                }
                previous = Some(sample.point);
            }
            StrokeEntry::Break { .. } => previous = None,
        }
    }
    mask
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScore {
    pub similarity: f64,
    pub passes: bool,
}

impl SimilarityScore {
    pub const ZERO: Self = Self {
        similarity: 0.0,
        passes: false,
    };

    pub fn percent(&self) -> f64 {
        self.similarity * 100.0
    }

    pub fn status_message(&self) -> StatusMessage {
        let text = format!(
            "Similarity: {:.2}% ({})",
            self.percent(),
            if self.passes { "OK" } else { "TRY AGAIN" }
        );
        if self.passes {
            StatusMessage::success(text)
        } else {
            StatusMessage::failure(text)
        }
    }
}

/// Fraction of the stroke pixels that land inside the target band.
pub fn similarity(target: &Mask, stroke: &Mask, threshold: f64) -> SimilarityScore {
    let drawn = stroke.count_nonzero();
    if drawn == 0 {
        return SimilarityScore::ZERO;
    }
    let hits = target.count_intersection(stroke);
    let similarity = hits as f64 / drawn as f64;
    SimilarityScore {
        similarity,
        passes: similarity >= threshold,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMasks {
    pub target: Mask,
    pub stroke: Mask,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreParams {
    pub canvas: (u32, u32),
    pub target: Rect,
    pub pen_thickness: u32,
    pub tolerance_margin: u32,
    pub threshold: f64,
}

pub fn score(buffer: &StrokeBuffer, params: ScoreParams) -> (SimilarityScore, ScoreMasks) {
    let (width, height) = params.canvas;
    let target = target_mask(
        width,
        height,
        params.target,
        params.pen_thickness,
        params.tolerance_margin,
    );
    let stroke = stroke_mask(buffer, width, height);
    let result = similarity(&target, &stroke, params.threshold);
    (result, ScoreMasks { target, stroke })
}
