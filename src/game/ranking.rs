use anyhow::{bail, Context, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

pub const RANKING_FILE: &str = "ranking.txt";
pub const ENTRY_SEPARATOR: &str = ":=";
/// Owner of scores migrated from the anonymous flat-list format.
pub const LEGACY_PLAYER: &str = "anonymous";

#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub player_name: String,
    pub best_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ParsedLine<'a> {
    Named(&'a str, f64),
    Legacy(f64),
}

/// Best score per player, kept sorted by descending score.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankingTable {
    entries: Vec<RankingEntry>,
    migrated_legacy: bool,
}

impl RankingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses both the `name:=score` format and the legacy one-score-per-line
    /// format. Unparseable lines are skipped; duplicate names keep their best.
    pub fn parse(content: &str) -> Self {
        let mut best: HashMap<String, f64> = HashMap::new();
        let mut migrated_legacy = false;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, score) = match parse_line(line) {
                Some(ParsedLine::Named(name, score)) => (name, score),
                Some(ParsedLine::Legacy(score)) => {
                    migrated_legacy = true;
                    (LEGACY_PLAYER, score)
                }
                None => {
                    tracing::debug!(line, "skipping unparseable ranking line");
                    continue;
                }
            };
            let slot = best.entry(name.to_string()).or_insert(score);
            if score > *slot {
                *slot = score;
            }
        }

        let mut table = Self {
            entries: best
                .into_iter()
                .map(|(player_name, best_score)| RankingEntry {
                    player_name,
                    best_score,
                })
                .collect(),
            migrated_legacy,
        };
        table.sort();
        table
    }

    /// Missing file means an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read ranking file {}", path.display()))?;
        let table = Self::parse(&content);
        if table.migrated_legacy {
            tracing::info!(
                path = %path.display(),
                "ranking file uses the legacy score list; it will be rewritten on next save"
            );
        }
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create ranking folder {}", parent.display()))?;
        }
        std::fs::write(path, self.to_text())
            .with_context(|| format!("write ranking file {}", path.display()))
    }

    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{}{ENTRY_SEPARATOR}{:.4}\n",
                    entry.player_name, entry.best_score
                )
            })
            .collect()
    }

    /// Records `score` for `player_name` if it beats the stored best.
    /// Returns whether the table changed.
    pub fn record(&mut self, player_name: &str, score: f64) -> Result<bool> {
        let name = sanitize_name(player_name)?;
        if !score.is_finite() {
            bail!("score for {name} is not a finite number");
        }
        let changed = match self.entries.iter_mut().find(|e| e.player_name == name) {
            Some(entry) if score > entry.best_score => {
                entry.best_score = score;
                true
            }
            Some(_) => false,
            None => {
                self.entries.push(RankingEntry {
                    player_name: name,
                    best_score: score,
                });
                true
            }
        };
        if changed {
            self.sort();
        }
        Ok(changed)
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn best_for(&self, player_name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.player_name == player_name.trim())
            .map(|entry| entry.best_score)
    }

    pub fn position_of(&self, player_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.player_name == player_name.trim())
            .map(|idx| idx + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn migrated_legacy(&self) -> bool {
        self.migrated_legacy
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| {
            b.best_score
                .partial_cmp(&a.best_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.player_name.cmp(&b.player_name))
        });
    }
}

/// Load, merge one score, and write back in a single step.
pub fn commit_score(path: &Path, player_name: &str, score: f64) -> Result<RankingTable> {
    let mut table = RankingTable::load(path)?;
    let changed = table.record(player_name, score)?;
    if changed || table.migrated_legacy {
        table.save(path)?;
        table.migrated_legacy = false;
    }
    Ok(table)
}

fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    if let Some((name, score)) = line.rsplit_once(ENTRY_SEPARATOR) {
        let name = name.trim();
        let score: f64 = score.trim().parse().ok()?;
        if name.is_empty() || !score.is_finite() {
            return None;
        }
        return Some(ParsedLine::Named(name, score));
    }
    let score: f64 = line.parse().ok()?;
    score.is_finite().then_some(ParsedLine::Legacy(score))
}

fn sanitize_name(player_name: &str) -> Result<String> {
    let mut name: String = player_name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    while name.contains(ENTRY_SEPARATOR) {
        name = name.replace(ENTRY_SEPARATOR, ":");
    }
    let name = name.trim().to_string();
    if name.is_empty() {
        bail!("player name must not be empty");
    }
    Ok(name)
}
