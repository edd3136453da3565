use crate::draw::model::Point;

/// Jumps up to this many pixels are recorded as a single point.
const MIN_INTERPOLATION_DIST: f64 = 5.0;
/// Target spacing between interpolated points.
const INTERPOLATION_SPACING: f64 = 3.0;

/// Lazily yields the points that fill the gap between two raw fingertip
/// positions.
///
/// Distances above five pixels produce `floor(d / 3) + 1` points evenly
/// spaced from `previous` to `current` (both ends included). Anything shorter
/// yields `current` alone.
#[derive(Debug, Clone)]
pub struct Interpolation {
    start: Point,
    end: Point,
    steps: u32,
    next: u32,
    total: u32,
}

impl Iterator for Interpolation {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += 1;
        if self.steps == 0 {
            return Some(self.end);
        }
        let t = index as f64 / self.steps as f64;
        let dx = self.end.0 as f64 - self.start.0 as f64;
        let dy = self.end.1 as f64 - self.start.1 as f64;
        // Truncation toward zero, matching integer pixel snapping.
        Some((
            (self.start.0 as f64 + dx * t) as i32,
            (self.start.1 as f64 + dy * t) as i32,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Interpolation {}

pub fn smooth(previous: Point, current: Point) -> Interpolation {
    let dx = current.0 as f64 - previous.0 as f64;
    let dy = current.1 as f64 - previous.1 as f64;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance > MIN_INTERPOLATION_DIST {
        let steps = (distance / INTERPOLATION_SPACING) as u32;
        Interpolation {
            start: previous,
            end: current,
            steps,
            next: 0,
            total: steps + 1,
        }
    } else {
        Interpolation {
            start: current,
            end: current,
            steps: 0,
            next: 0,
            total: 1,
        }
    }
}

/// Remembers the last raw fingertip position while the pen is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Smoother {
    previous: Option<Point>,
}

impl Smoother {
    /// Returns the points to record for `current`. The first point after a
    /// pen lift is never interpolated.
    pub fn feed(&mut self, current: Point) -> Interpolation {
        let previous = self.previous.replace(current).unwrap_or(current);
        smooth(previous, current)
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    pub fn is_lifted(&self) -> bool {
        self.previous.is_none()
    }
}
