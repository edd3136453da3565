use crate::draw::toolbar::DEFAULT_COOLDOWN_FRAMES;
use crate::game::ranking::RANKING_FILE;
use crate::game::scoring::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOLERANCE_MARGIN};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const MIN_THICKNESS: u32 = 5;
pub const MAX_THICKNESS: u32 = 50;
pub const THICKNESS_STEP: u32 = 5;
/// Largest accepted canvas side; masks are allocated at canvas size.
pub const MAX_CANVAS_DIMENSION: u32 = 8192;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    /// Frame size used for masks, the target and input mirroring.
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    /// Folder holding drawing files and the ranking table.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_ranking_file")]
    pub ranking_file: String,
    /// When set, every completed scoring attempt is offered to the ranking.
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_tolerance_margin")]
    pub tolerance_margin: u32,
    #[serde(default = "default_button_cooldown_frames")]
    pub button_cooldown_frames: u32,
    #[serde(default = "default_thickness")]
    pub default_thickness: u32,
    /// Hit-test buttons in the horizontally flipped (selfie) space.
    #[serde(default = "default_mirror_input")]
    pub mirror_input: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// When set, each scoring writes the target and stroke masks as PNG.
    #[serde(default)]
    pub mask_snapshot_dir: Option<PathBuf>,
}

fn default_canvas_width() -> u32 {
    1280
}

fn default_canvas_height() -> u32 {
    720
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_ranking_file() -> String {
    RANKING_FILE.to_string()
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_tolerance_margin() -> u32 {
    DEFAULT_TOLERANCE_MARGIN
}

fn default_button_cooldown_frames() -> u32 {
    DEFAULT_COOLDOWN_FRAMES
}

fn default_thickness() -> u32 {
    20
}

fn default_mirror_input() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            data_dir: default_data_dir(),
            ranking_file: default_ranking_file(),
            player_name: None,
            similarity_threshold: default_similarity_threshold(),
            tolerance_margin: default_tolerance_margin(),
            button_cooldown_frames: default_button_cooldown_frames(),
            default_thickness: default_thickness(),
            mirror_input: default_mirror_input(),
            debug_logging: false,
            log_file: None,
            mask_snapshot_dir: None,
        }
    }
}

impl AppSettings {
    /// A missing or blank file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut loaded: Self = serde_json::from_str(&content)
            .with_context(|| format!("deserialize settings file {}", path.display()))?;
        loaded.sanitize();
        Ok(loaded)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings folder {}", parent.display()))?;
        }
        let mut sanitized = self.clone();
        sanitized.sanitize();
        let json = serde_json::to_string_pretty(&sanitized).context("serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("write settings file {}", path.display()))
    }

    pub fn sanitize(&mut self) {
        self.canvas_width = self.canvas_width.clamp(1, MAX_CANVAS_DIMENSION);
        self.canvas_height = self.canvas_height.clamp(1, MAX_CANVAS_DIMENSION);
        self.similarity_threshold = if self.similarity_threshold.is_finite() {
            self.similarity_threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_SIMILARITY_THRESHOLD
        };
        self.default_thickness = self.default_thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        if self.ranking_file.trim().is_empty() {
            self.ranking_file = default_ranking_file();
        }
        if self
            .player_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            self.player_name = None;
        }
    }

    pub fn canvas(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn drawing_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ranking_path(&self) -> PathBuf {
        self.data_dir.join(&self.ranking_file)
    }
}
