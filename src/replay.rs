use crate::draw::messages::{FrameInput, HandSample, Shortcut};
use crate::session::{FrameOutput, SessionController};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Supplies one hand-pose sample (or none) per frame.
pub trait InputSource {
    /// `Ok(None)` ends the session.
    fn next_frame(&mut self) -> Result<Option<FrameInput>>;
}

/// Receives the commands produced for each frame.
pub trait RenderSink {
    fn present(&mut self, frame_index: u64, output: &FrameOutput) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct FrameLine {
    #[serde(default)]
    hand: Option<HandSample>,
    #[serde(default)]
    key: Option<String>,
}

/// Reads frames from JSON lines such as
/// `{"hand": {"x": 640, "y": 300, "fingers": 1}, "key": null}`.
///
/// Blank and malformed lines become frames without input so the frame
/// count of a recording is preserved.
pub struct ScriptedInput<R> {
    reader: R,
    line_number: usize,
}

impl ScriptedInput<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("open input script {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ScriptedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_line(&self, line: &str) -> FrameInput {
        let line = line.trim();
        if line.is_empty() {
            return FrameInput::empty();
        }
        let parsed: FrameLine = match serde_json::from_str(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(line = self.line_number, error = %err, "malformed input line");
                return FrameInput::empty();
            }
        };
        let shortcut = parsed.key.as_deref().and_then(|key| {
            let shortcut = Shortcut::parse(key);
            if shortcut.is_none() {
                tracing::warn!(line = self.line_number, key, "unknown shortcut key");
            }
            shortcut
        });
        FrameInput {
            hand: parsed
                .hand
                .map(|hand| HandSample::new(hand.fingertip(), hand.fingers_up)),
            shortcut,
        }
    }
}

impl<R: BufRead> InputSource for ScriptedInput<R> {
    fn next_frame(&mut self) -> Result<Option<FrameInput>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .with_context(|| format!("read input line {}", self.line_number + 1))?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.parse_line(&line)))
    }
}

/// Sink for headless runs: logs a summary of each frame.
#[derive(Debug, Default)]
pub struct LogSink {
    frames: u64,
    last_status: Option<String>,
}

impl LogSink {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, frame_index: u64, output: &FrameOutput) -> Result<()> {
        self.frames += 1;
        tracing::trace!(
            frame = frame_index,
            scene = output.scene.len(),
            overlay = output.overlay.len(),
            "frame rendered"
        );
        if let Some(masks) = &output.masks {
            tracing::debug!(
                frame = frame_index,
                target_pixels = masks.target.count_nonzero(),
                stroke_pixels = masks.stroke.count_nonzero(),
                "masks produced"
            );
        }
        let status = output.status.as_ref().map(|status| status.text.clone());
        if status.is_some() && status != self.last_status {
            tracing::info!(frame = frame_index, status = status.as_deref(), "status");
            self.last_status = status;
        }
        Ok(())
    }
}

/// Drives a session until the input ends or a Quit shortcut arrives.
/// Returns the number of frames processed.
pub fn run(
    session: &mut SessionController,
    input: &mut dyn InputSource,
    sink: &mut dyn RenderSink,
) -> Result<u64> {
    let mut frame_index = 0;
    while let Some(frame) = input.next_frame()? {
        let output = session.process_frame(frame);
        sink.present(frame_index, &output)?;
        frame_index += 1;
        if output.quit {
            tracing::info!(frame = frame_index, "quit requested");
            break;
        }
    }
    Ok(frame_index)
}
