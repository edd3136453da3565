use crate::draw::history::StrokeBuffer;
use crate::draw::model::{Rgb, StrokeEntry, StrokeSample};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DRAWING_FILE_PREFIX: &str = "desenho_";
pub const DRAWING_FILE_EXTENSION: &str = ".json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// On-disk form of one buffer entry.
///
/// Breaks carry `"pen_up": true` plus the legacy sentinel coordinate `x == 0`.
/// Files written before the flag existed fall back to the sentinel rule and
/// store their colors in BGR channel order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub x: i32,
    pub y: i32,
    #[serde(alias = "cor")]
    pub color: [u8; 3],
    #[serde(alias = "espessura")]
    pub thickness: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pen_up: Option<bool>,
}

impl DrawingRecord {
    fn is_break(&self) -> bool {
        self.pen_up.unwrap_or(self.x == 0)
    }

    fn is_legacy(&self) -> bool {
        self.pen_up.is_none()
    }

    fn rgb(&self) -> Rgb {
        let [a, b, c] = self.color;
        if self.is_legacy() {
            Rgb::from_array([c, b, a])
        } else {
            Rgb::from_array(self.color)
        }
    }
}

pub fn encode(buffer: &StrokeBuffer) -> Vec<DrawingRecord> {
    buffer
        .entries()
        .iter()
        .map(|entry| match entry {
            StrokeEntry::Sample(sample) => DrawingRecord {
                x: sample.point.0,
                y: sample.point.1,
                color: sample.color.to_array(),
                thickness: sample.thickness,
                pen_up: Some(false),
            },
            StrokeEntry::Break { color, thickness } => DrawingRecord {
                x: 0,
                y: 0,
                color: color.to_array(),
                thickness: *thickness,
                pen_up: Some(true),
            },
        })
        .collect()
}

pub fn decode(records: &[DrawingRecord]) -> StrokeBuffer {
    let entries = records
        .iter()
        .map(|record| {
            let color = record.rgb();
            if record.is_break() {
                StrokeEntry::Break {
                    color,
                    thickness: record.thickness,
                }
            } else {
                StrokeEntry::Sample(StrokeSample {
                    point: (record.x, record.y),
                    color,
                    thickness: record.thickness,
                })
            }
        })
        .collect();
    StrokeBuffer::from_entries(entries)
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

pub fn build_filename(stem: &str) -> String {
    format!("{DRAWING_FILE_PREFIX}{stem}{DRAWING_FILE_EXTENSION}")
}

/// True for `desenho_YYYYMMDD_HHMMSS.json`. Recency is read from the name,
/// so anything else is ignored by the loader.
pub fn is_drawing_file_name(name: &str) -> bool {
    name.strip_prefix(DRAWING_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(DRAWING_FILE_EXTENSION))
        .is_some_and(|stem| {
            stem.len() == 15 && NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).is_ok()
        })
}

/// Writes the buffer next to earlier saves. Returns `None` for an empty
/// buffer, which is not written.
pub fn save_drawing(
    dir: &Path,
    buffer: &StrokeBuffer,
    now: chrono::DateTime<Local>,
) -> Result<Option<PathBuf>> {
    if buffer.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("create drawing folder {}", dir.display()))?;
    let path = dir.join(build_filename(&timestamped_stem(now)));
    let json = serde_json::to_string(&encode(buffer)).context("serialize drawing")?;
    fs::write(&path, json).with_context(|| format!("write drawing file {}", path.display()))?;
    Ok(Some(path))
}

pub fn latest_drawing(dir: &Path) -> Result<Option<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("list drawing folder {}", dir.display()))?;
    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry of {}", dir.display()))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_drawing_file_name(&name) {
            continue;
        }
        if latest.as_deref().map_or(true, |current| name.as_str() > current) {
            latest = Some(name);
        }
    }
    Ok(latest.map(|name| dir.join(name)))
}

pub fn load_drawing(path: &Path) -> Result<StrokeBuffer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read drawing file {}", path.display()))?;
    let records: Vec<DrawingRecord> = serde_json::from_str(&content)
        .with_context(|| format!("deserialize drawing file {}", path.display()))?;
    Ok(decode(&records))
}

/// Most recent save in `dir`, or `None` when there is none.
pub fn load_latest(dir: &Path) -> Result<Option<(PathBuf, StrokeBuffer)>> {
    let Some(path) = latest_drawing(dir)? else {
        return Ok(None);
    };
    let buffer = load_drawing(&path)?;
    Ok(Some((path, buffer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_uses_fixed_timestamp_format() {
        let dt = Local
            .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("date time");
        assert_eq!(
            build_filename(&timestamped_stem(dt)),
            "desenho_20260102_030405.json"
        );
    }

    #[test]
    fn drawing_file_name_pattern() {
        assert!(is_drawing_file_name("desenho_20260102_030405.json"));
        assert!(!is_drawing_file_name("desenho_latest.json"));
        assert!(!is_drawing_file_name("desenho_20260102_030405.png"));
        assert!(!is_drawing_file_name("ranking.txt"));
    }

    #[test]
    fn legacy_records_use_sentinel_and_old_field_names() {
        let json = r#"[
            {"x": 10, "y": 12, "cor": [0, 0, 255], "espessura": 20},
            {"x": 0, "y": 0, "cor": [0, 0, 255], "espessura": 20},
            {"x": 30, "y": 32, "cor": [0, 255, 0], "espessura": 25}
        ]"#;
        let records: Vec<DrawingRecord> = serde_json::from_str(json).expect("parse legacy");
        let buffer = decode(&records);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.entries()[0].color(), Rgb::rgb(255, 0, 0));
        assert!(buffer.entries()[1].is_break());
        assert_eq!(buffer.entries()[2].thickness(), 25);
        assert_eq!(buffer.entries()[2].color(), Rgb::rgb(0, 255, 0));
    }

    #[test]
    fn flagged_sample_at_x_zero_survives() {
        let mut buffer = StrokeBuffer::new();
        buffer.append_sample((0, 40), Rgb::RED, 10);
        let decoded = decode(&encode(&buffer));
        assert_eq!(decoded, buffer);
    }
}
