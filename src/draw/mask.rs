use crate::draw::model::{Point, Rect};
use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use std::path::Path;

const ON: Luma<u8> = Luma([255]);

/// Binary single-channel raster. Any non-zero pixel counts as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    image: GrayImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.image.get_pixel(x as u32, y as u32).0[0] != 0
    }

    pub fn set(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, ON);
        }
    }

    pub fn count_nonzero(&self) -> usize {
        self.image.as_raw().iter().filter(|px| **px != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.image.as_raw().iter().all(|px| *px == 0)
    }

    /// Pixel-wise AND. Both masks must share dimensions; the result is
    /// cropped to the smaller one otherwise.
    pub fn intersection(&self, other: &Mask) -> Mask {
        let width = self.width().min(other.width());
        let height = self.height().min(other.height());
        let mut out = Mask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if self.image.get_pixel(x, y).0[0] != 0 && other.image.get_pixel(x, y).0[0] != 0 {
                    out.image.put_pixel(x, y, ON);
                }
            }
        }
        out
    }

    pub fn count_intersection(&self, other: &Mask) -> usize {
        if self.width() == other.width() && self.height() == other.height() {
            return self
                .image
                .as_raw()
                .iter()
                .zip(other.image.as_raw())
                .filter(|(a, b)| **a != 0 && **b != 0)
                .count();
        }
        self.intersection(other).count_nonzero()
    }

    /// Filled disc of the given radius.
    pub fn fill_circle(&mut self, center: Point, radius: u32) {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        let Some(clip) = self.clip(
            center.0.saturating_sub(r),
            center.1.saturating_sub(r),
            center.0.saturating_add(r),
            center.1.saturating_add(r),
        ) else {
            return;
        };
        let r_sq = (r as i64) * (r as i64);
        for y in clip.y0..=clip.y1 {
            for x in clip.x0..=clip.x1 {
                let dx = x as i64 - center.0 as i64;
                let dy = y as i64 - center.1 as i64;
                if dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r_sq {
                    self.image.put_pixel(x as u32, y as u32, ON);
                }
            }
        }
    }

    /// Line of `thickness` pixels with round caps: every pixel within
    /// `thickness / 2` of the segment is set.
    pub fn stroke_segment(&mut self, start: Point, end: Point, thickness: u32) {
        let radius = thickness.max(1) as f64 / 2.0;
        let pad = (radius.ceil() as i32).saturating_add(1);
        let Some(clip) = self.clip(
            start.0.min(end.0).saturating_sub(pad),
            start.1.min(end.1).saturating_sub(pad),
            start.0.max(end.0).saturating_add(pad),
            start.1.max(end.1).saturating_add(pad),
        ) else {
            return;
        };

        let radius_sq = radius * radius;
        for y in clip.y0..=clip.y1 {
            for x in clip.x0..=clip.x1 {
                if point_segment_distance_sq((x, y), start, end) <= radius_sq {
                    self.image.put_pixel(x as u32, y as u32, ON);
                }
            }
        }
    }

    /// Hollow rectangle whose outline is centered on the rectangle edges.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: u32) {
        let corners = [
            (rect.x1, rect.y1),
            (rect.x2, rect.y1),
            (rect.x2, rect.y2),
            (rect.x1, rect.y2),
        ];
        for idx in 0..corners.len() {
            let next = corners[(idx + 1) % corners.len()];
            self.stroke_segment(corners[idx], next, thickness);
        }
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("write mask image {}", path.display()))
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    fn clip(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<Bounds> {
        if self.width() == 0 || self.height() == 0 {
            return None;
        }
        let max_x = self.width() as i32 - 1;
        let max_y = self.height() as i32 - 1;
        let bounds = Bounds {
            x0: x0.clamp(0, max_x),
            y0: y0.clamp(0, max_y),
            x1: x1.clamp(0, max_x),
            y1: y1.clamp(0, max_y),
        };
        if x1 < 0 || y1 < 0 || x0 > max_x || y0 > max_y {
            return None;
        }
        Some(bounds)
    }
}

fn point_segment_distance_sq(point: Point, start: Point, end: Point) -> f64 {
    let px = point.0 as f64;
    let py = point.1 as f64;
    let x0 = start.0 as f64;
    let y0 = start.1 as f64;
    let vx = end.0 as f64 - x0;
    let vy = end.1 as f64 - y0;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        let dx = px - x0;
        let dy = py - y0;
        return dx * dx + dy * dy;
    }
    let t = (((px - x0) * vx + (py - y0) * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (x0 + vx * t);
    let dy = py - (y0 + vy * t);
    dx * dx + dy * dy
}
