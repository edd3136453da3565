use air_canvas::draw::input::{smooth, Smoother};
use air_canvas::draw::{Point, Rgb, StrokeBuffer, StrokeEntry};

const BLUE: Rgb = Rgb::rgb(0, 0, 255);

fn points(buffer: &StrokeBuffer) -> Vec<Option<Point>> {
    buffer
        .entries()
        .iter()
        .map(|entry| entry.sample().map(|sample| sample.point))
        .collect()
}

#[test]
fn undo_removes_trailing_segment_then_everything() {
    let mut buffer = StrokeBuffer::new();
    buffer.append_sample((10, 10), BLUE, 20);
    buffer.append_sample((20, 20), BLUE, 20);
    buffer.append_break(BLUE, 20);
    buffer.append_sample((30, 30), BLUE, 20);

    buffer.undo_last_stroke();
    assert_eq!(points(&buffer), vec![Some((10, 10)), Some((20, 20))]);

    buffer.undo_last_stroke();
    assert!(buffer.is_empty());

    assert_eq!(buffer.undo_last_stroke(), 0);
    assert!(buffer.is_empty());
}

#[test]
fn break_is_idempotent_and_never_leads() {
    let mut buffer = StrokeBuffer::new();
    assert!(!buffer.append_break(BLUE, 20));
    buffer.append_sample((5, 5), BLUE, 20);
    assert!(buffer.append_break(BLUE, 20));
    assert!(!buffer.append_break(BLUE, 20));
    assert_eq!(buffer.len(), 2);
    assert!(matches!(buffer.last(), Some(StrokeEntry::Break { .. })));
}

#[test]
fn polylines_follow_breaks() {
    let mut buffer = StrokeBuffer::new();
    for x in [10, 20, 30] {
        buffer.append_sample((x, 10), BLUE, 20);
    }
    buffer.append_break(BLUE, 20);
    buffer.append_sample((50, 50), BLUE, 20);
    let lengths: Vec<usize> = buffer.polylines().map(|run| run.len()).collect();
    assert_eq!(lengths, vec![3, 1]);
}

#[test]
fn short_moves_yield_the_current_point() {
    for (from, to) in [((0, 0), (3, 4)), ((100, 100), (100, 105)), ((7, 7), (7, 7))] {
        let out: Vec<Point> = smooth(from, to).collect();
        assert_eq!(out, vec![to]);
    }
}

#[test]
fn long_moves_are_filled_along_the_segment() {
    let from = (200, 100);
    let to = (260, 180);
    let out: Vec<Point> = smooth(from, to).collect();
    // d = 100
    assert_eq!(out.len(), 100 / 3 + 1);
    assert_eq!(out[0], from);
    assert_eq!(*out.last().expect("last point"), to);
    for pair in out.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
        assert!(pair[0].1 <= pair[1].1);
    }
    for (x, y) in &out {
        // On the line 4x - 3y = 500, up to truncation.
        let residual = 4 * x - 3 * y - 500;
        assert!(residual.abs() <= 7, "({x}, {y}) is off the segment");
    }
}

#[test]
fn smoother_restarts_after_lift() {
    let mut smoother = Smoother::default();
    assert_eq!(smoother.feed((0, 0)).len(), 1);
    assert_eq!(smoother.feed((30, 0)).len(), 11);
    smoother.reset();
    assert!(smoother.is_lifted());
    assert_eq!(smoother.feed((300, 300)).collect::<Vec<_>>(), vec![(300, 300)]);
}
