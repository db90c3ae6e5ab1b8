use crossword_core::{Clue, CompletionReport, ResultsSink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Lifetime statistics across puzzles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub puzzles_completed: usize,
    pub words_completed: usize,
    pub hints_used: usize,
    /// Completed without revealing any cell
    pub clean_solves: usize,
    /// Unix timestamp of the last completed puzzle
    pub last_completed: Option<u64>,
}

/// Sink that folds completion events into [`PlayerStats`] on disk
pub struct StatsRecorder {
    path: PathBuf,
    stats: PlayerStats,
}

impl StatsRecorder {
    pub fn new(dir: &Path) -> Self {
        let path = dir.join("crossword_stats.json");
        let stats = Self::read(&path);
        Self { path, stats }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    fn read(path: &Path) -> PlayerStats {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Ignoring unreadable stats file: {}", e);
                PlayerStats::default()
            }),
            Err(_) => PlayerStats::default(),
        }
    }

    fn save(&self) {
        let result = serde_json::to_string_pretty(&self.stats)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                if let Some(dir) = self.path.parent() {
                    fs::create_dir_all(dir).map_err(|e| e.to_string())?;
                }
                fs::write(&self.path, json).map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!("Could not save stats: {}", e);
        }
    }
}

impl ResultsSink for StatsRecorder {
    fn word_completed(&mut self, _clue: &Clue) {
        self.stats.words_completed += 1;
        self.save();
    }

    fn puzzle_completed(&mut self, report: &CompletionReport) {
        self.stats.puzzles_completed += 1;
        self.stats.hints_used += report.hints_used;
        if report.hints_used == 0 {
            self.stats.clean_solves += 1;
        }
        self.stats.last_completed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs());
        self.save();
    }
}
