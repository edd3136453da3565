use crate::draw::model::{Point, Rgb, StrokeEntry, StrokeSample};

/// Ordered stroke history. Consecutive samples form a polyline; a break
/// entry ends it without connecting to whatever comes next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StrokeBuffer {
    entries: Vec<StrokeEntry>,
}

impl StrokeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<StrokeEntry>) -> Self {
        Self { entries }
    }

    pub fn append_sample(&mut self, point: Point, color: Rgb, thickness: u32) {
        self.entries.push(StrokeEntry::Sample(StrokeSample {
            point,
            color,
            thickness,
        }));
    }

    /// Pushes a break unless the buffer is empty or already ends in one.
    pub fn append_break(&mut self, color: Rgb, thickness: u32) -> bool {
        match self.entries.last() {
            Some(last) if !last.is_break() => {
                self.entries.push(StrokeEntry::Break { color, thickness });
                true
            }
            _ => false,
        }
    }

    /// Removes the trailing polyline, finished or not. A trailing break is
    /// dropped first, then entries are popped until the break that opened
    /// the segment has been popped: `[A, B, break, C]` becomes `[A, B]`.
    pub fn undo_last_stroke(&mut self) -> usize {
        let before = self.entries.len();
        if self.entries.last().is_some_and(|entry| entry.is_break()) {
            self.entries.pop();
        }
        while let Some(entry) = self.entries.pop() {
            if entry.is_break() {
                break;
            }
        }
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn replace(&mut self, other: StrokeBuffer) {
        self.entries = other.entries;
    }

    pub fn entries(&self) -> &[StrokeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&StrokeEntry> {
        self.entries.last()
    }

    pub fn sample_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_break()).count()
    }

    /// Splits the buffer into its polylines, skipping empty runs.
    pub fn polylines(&self) -> impl Iterator<Item = &[StrokeEntry]> + '_ {
        self.entries
            .split(|entry| entry.is_break())
            .filter(|run| !run.is_empty())
    }
}
