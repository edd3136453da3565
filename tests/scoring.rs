use air_canvas::draw::mask::Mask;
use air_canvas::draw::{Rect, Rgb, StrokeBuffer};
use air_canvas::game::scoring::{
    score, similarity, stroke_mask, target_mask, target_shape, ScoreParams,
};

const CANVAS: (u32, u32) = (1280, 720);

fn params(target: Rect) -> ScoreParams {
    ScoreParams {
        canvas: CANVAS,
        target,
        pen_thickness: 20,
        tolerance_margin: 5,
        threshold: 0.75,
    }
}

fn trace_outline(buffer: &mut StrokeBuffer, rect: Rect) {
    let corners = [
        (rect.x1, rect.y1),
        (rect.x2, rect.y1),
        (rect.x2, rect.y2),
        (rect.x1, rect.y2),
        (rect.x1, rect.y1),
    ];
    for corner in corners {
        buffer.append_sample(corner, Rgb::RED, 20);
    }
    buffer.append_break(Rgb::RED, 20);
}

#[test]
fn traced_outline_scores_full_similarity() {
    let target = target_shape(CANVAS.0, CANVAS.1);
    let mut buffer = StrokeBuffer::new();
    trace_outline(&mut buffer, target);

    let (result, masks) = score(&buffer, params(target));
    assert_eq!(result.similarity, 1.0);
    assert!(result.passes);
    assert_eq!(masks.target.width(), CANVAS.0);
    assert_eq!(masks.stroke.height(), CANVAS.1);
}

#[test]
fn scribble_in_the_middle_fails() {
    let target = target_shape(CANVAS.0, CANVAS.1);
    let mut buffer = StrokeBuffer::new();
    buffer.append_sample((620, 340), Rgb::RED, 20);
    buffer.append_sample((660, 380), Rgb::RED, 20);

    let (result, _) = score(&buffer, params(target));
    assert_eq!(result.similarity, 0.0);
    assert!(!result.passes);
}

#[test]
fn empty_stroke_mask_scores_zero_for_any_target() {
    let target = target_mask(CANVAS.0, CANVAS.1, target_shape(CANVAS.0, CANVAS.1), 20, 5);
    assert!(!target.is_empty());
    let stroke = stroke_mask(&StrokeBuffer::new(), CANVAS.0, CANVAS.1);
    let result = similarity(&target, &stroke, 0.0);
    assert_eq!(result.similarity, 0.0);
    assert!(!result.passes);
}

#[test]
fn partial_overlap_is_a_ratio_of_drawn_pixels() {
    let mut target = Mask::new(10, 10);
    let mut stroke = Mask::new(10, 10);
    for x in 0..4 {
        target.set(x, 0);
        stroke.set(x, 0);
    }
    for x in 4..8 {
        stroke.set(x, 0);
    }
    let result = similarity(&target, &stroke, 0.75);
    assert_eq!(result.similarity, 0.5);
    assert!(!result.passes);
}

#[test]
fn degenerate_target_never_passes() {
    let target = target_shape(200, 200);
    assert_eq!(target, Rect::ZERO);
    let mut buffer = StrokeBuffer::new();
    buffer.append_sample((100, 100), Rgb::RED, 20);
    let (result, masks) = score(
        &buffer,
        ScoreParams {
            canvas: (200, 200),
            ..params(target)
        },
    );
    assert!(masks.target.is_empty());
    assert_eq!(result.similarity, 0.0);
}
