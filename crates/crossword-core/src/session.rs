//! The single owner of a puzzle in play.
//!
//! All player edits go through [`Session`], which re-evaluates completion
//! after each one, reports progress to a [`ResultsSink`], and persists the
//! puzzle and its flags to a [`KeyValueStore`].

use crate::completion::{self, CompletionState, Progress};
use crate::error::{CrosswordError, Result};
use crate::generator::{Generator, GeneratorConfig};
use crate::grid::{Cell, Clue, Puzzle, WordId};
use crate::storage::KeyValueStore;
use crate::word_bank::{fold_letter, WordBank};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Key holding the persisted puzzle document
pub const PUZZLE_KEY: &str = "crossword-puzzle";
/// Key holding whether the player has started the current puzzle
pub const STARTED_KEY: &str = "crossword-started";
/// Key holding reporting bookkeeping for the current puzzle
pub const REPORT_KEY: &str = "crossword-report";
/// Key holding the settings the current puzzle was generated with
pub const CONFIG_KEY: &str = "crossword-config";

/// Summary handed to the sink when a puzzle is finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub words: usize,
    pub hints_used: usize,
    pub size: usize,
}

/// Receives results as the player progresses
pub trait ResultsSink {
    /// Called once per newly completed word
    fn word_completed(&mut self, _clue: &Clue) {}

    /// Called once, the first time the whole puzzle is complete
    fn puzzle_completed(&mut self, report: &CompletionReport);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ResultsSink for NullSink {
    fn puzzle_completed(&mut self, _report: &CompletionReport) {}
}

/// Reporting bookkeeping persisted alongside the puzzle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportState {
    /// Completed words already reported to the sink
    reported_words: BTreeSet<WordId>,
    puzzle_reported: bool,
    hints_used: usize,
}

/// Result of one edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Words that became complete with this edit
    pub newly_completed: Vec<WordId>,
    /// The edit finished the puzzle
    pub puzzle_completed: bool,
}

pub struct Session<S: KeyValueStore> {
    store: S,
    sink: Box<dyn ResultsSink>,
    bank: WordBank,
    config: GeneratorConfig,
    puzzle: Puzzle,
    started: bool,
    completion: CompletionState,
    report: ReportState,
    dirty: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Resume the persisted puzzle, or generate a fresh one if none is
    /// stored or the stored one cannot be used.
    ///
    /// Regeneration uses the settings saved with the previous puzzle, and
    /// falls back to `config` when there are none.
    pub fn restore(
        store: S,
        bank: WordBank,
        sink: Box<dyn ResultsSink>,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        let config = Self::load_config(&store).unwrap_or_else(|| config.clone());
        match Self::load_puzzle(&store) {
            Some(puzzle) => {
                let started = Self::load_flag(&store, STARTED_KEY);
                let report = Self::load_report(&store);
                let mut session =
                    Self::assemble(store, bank, sink, config, puzzle, started, report);
                // Reporting already happened before the save
                let completed = session.completion.completed_words.clone();
                session.report.reported_words.extend(completed);
                info!(words = session.puzzle.word_count(), started, "Restored saved puzzle");
                Ok(session)
            }
            None => Self::start(store, bank, sink, &config),
        }
    }

    /// Begin a freshly generated puzzle, discarding whatever `store` holds
    pub fn start(
        store: S,
        bank: WordBank,
        sink: Box<dyn ResultsSink>,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        let puzzle = Self::generate(&bank, config)?;
        let mut session = Self::assemble(
            store,
            bank,
            sink,
            config.clone(),
            puzzle,
            false,
            ReportState::default(),
        );
        session.clear_persisted();
        session.persist();
        info!(words = session.puzzle.word_count(), "Started new puzzle");
        Ok(session)
    }

    fn assemble(
        store: S,
        bank: WordBank,
        sink: Box<dyn ResultsSink>,
        config: GeneratorConfig,
        puzzle: Puzzle,
        started: bool,
        report: ReportState,
    ) -> Self {
        let completion = completion::evaluate(&puzzle);
        let puzzle = completion::refresh_cell_correctness(&puzzle, &completion.completed_words);
        Self {
            store,
            sink,
            bank,
            config,
            puzzle,
            started,
            completion,
            report,
            dirty: false,
        }
    }

    fn generate(bank: &WordBank, config: &GeneratorConfig) -> Result<Puzzle> {
        Generator::with_config(bank.clone(), config.clone()).generate()
    }

    fn load_puzzle(store: &S) -> Option<Puzzle> {
        let raw = match store.load(PUZZLE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read saved puzzle: {}", e);
                return None;
            }
        };
        let puzzle: Puzzle = match serde_json::from_str(&raw) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                warn!("Discarding unreadable saved puzzle: {}", e);
                return None;
            }
        };
        if let Err(reason) = puzzle.validate() {
            warn!("Discarding malformed saved puzzle: {}", reason);
            return None;
        }
        Some(puzzle)
    }

    fn load_config(store: &S) -> Option<GeneratorConfig> {
        let raw = match store.load(CONFIG_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read '{}': {}", CONFIG_KEY, e);
                return None;
            }
        };
        match serde_json::from_str::<GeneratorConfig>(&raw) {
            Ok(config) if config.validate().is_ok() => Some(config),
            _ => {
                warn!("Ignoring unusable saved generator settings");
                None
            }
        }
    }

    fn load_flag(store: &S, key: &str) -> bool {
        match store.load(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                warn!("Could not read '{}': {}", key, e);
                false
            }
        }
    }

    fn load_report(store: &S) -> ReportState {
        match store.load(REPORT_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) => ReportState::default(),
            Err(e) => {
                warn!("Could not read '{}': {}", REPORT_KEY, e);
                ReportState::default()
            }
        }
    }

    /// The current puzzle, with player input and correctness flags
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Settings the current puzzle was generated with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_complete
    }

    pub fn completed_words(&self) -> &BTreeSet<WordId> {
        &self.completion.completed_words
    }

    pub fn hints_used(&self) -> usize {
        self.report.hints_used
    }

    pub fn progress(&self) -> Progress {
        completion::progress(&self.puzzle)
    }

    /// Whether the last save failed and is waiting to be retried
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Put `letter` in a cell. Accents are folded and case is ignored.
    pub fn set_input(&mut self, row: usize, col: usize, letter: char) -> Result<EditOutcome> {
        let folded = fold_letter(letter).ok_or(CrosswordError::InvalidLetter(letter))?;
        self.apply(row, col, Some(folded))
    }

    pub fn clear_input(&mut self, row: usize, col: usize) -> Result<EditOutcome> {
        self.apply(row, col, None)
    }

    /// Fill a cell with its solution letter, counting it as a hint
    pub fn reveal_cell(&mut self, row: usize, col: usize) -> Result<EditOutcome> {
        let letter = self.open_cell(row, col)?.letter;
        self.report.hints_used += 1;
        self.apply(row, col, Some(letter))
    }

    /// Replace the puzzle with a freshly generated one, discarding all
    /// persisted state and completion bookkeeping for the old one.
    pub fn new_puzzle(&mut self, config: &GeneratorConfig) -> Result<&Puzzle> {
        let puzzle = Self::generate(&self.bank, config)?;
        self.clear_persisted();

        self.completion = completion::evaluate(&puzzle);
        self.config = config.clone();
        self.puzzle = puzzle;
        self.started = false;
        self.report = ReportState::default();
        self.dirty = true;
        info!(words = self.puzzle.word_count(), "Started new puzzle");

        self.persist();
        Ok(&self.puzzle)
    }

    /// Retry any pending save
    pub fn flush(&mut self) -> bool {
        if self.dirty {
            self.persist();
        }
        !self.dirty
    }

    fn open_cell(&self, row: usize, col: usize) -> Result<&Cell> {
        let size = self.puzzle.size;
        let cell = self
            .puzzle
            .cell(row, col)
            .ok_or(CrosswordError::OutOfBounds { row, col, size })?;
        if cell.is_blocked {
            return Err(CrosswordError::BlockedCell { row, col });
        }
        Ok(cell)
    }

    fn apply(&mut self, row: usize, col: usize, input: Option<char>) -> Result<EditOutcome> {
        self.open_cell(row, col)?;
        if let Some(cell) = self.puzzle.cell_mut(row, col) {
            cell.user_input = input;
        }
        self.started = true;

        let previous = std::mem::take(&mut self.completion.completed_words);
        self.completion = completion::evaluate(&self.puzzle);
        self.puzzle =
            completion::refresh_cell_correctness(&self.puzzle, &self.completion.completed_words);

        let newly_completed: Vec<WordId> = self
            .completion
            .completed_words
            .difference(&previous)
            .copied()
            .collect();
        let puzzle_completed = self.report_progress(&newly_completed);

        self.dirty = true;
        self.persist();

        Ok(EditOutcome {
            newly_completed,
            puzzle_completed,
        })
    }

    /// Forward new completions to the sink. Each word is reported at most
    /// once per puzzle. Returns true if the puzzle was reported complete by
    /// this call.
    fn report_progress(&mut self, newly_completed: &[WordId]) -> bool {
        for id in newly_completed {
            if !self.report.reported_words.insert(*id) {
                continue;
            }
            if let Some(clue) = self.puzzle.clue(*id) {
                debug!(word = %id, "Word completed");
                self.sink.word_completed(clue);
            }
        }

        if self.completion.is_complete && !self.report.puzzle_reported {
            let report = CompletionReport {
                words: self.puzzle.word_count(),
                hints_used: self.report.hints_used,
                size: self.puzzle.size,
            };
            info!(words = report.words, hints = report.hints_used, "Puzzle completed");
            self.sink.puzzle_completed(&report);
            self.report.puzzle_reported = true;
            return true;
        }
        false
    }

    fn clear_persisted(&mut self) {
        for key in [PUZZLE_KEY, STARTED_KEY, REPORT_KEY, CONFIG_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!("Could not remove '{}': {}", key, e);
            }
        }
    }

    /// Save the puzzle and flags. Failures leave the session dirty so the
    /// next edit or [`Session::flush`] tries again.
    fn persist(&mut self) {
        match self.try_persist() {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!("Could not save puzzle, will retry: {}", e);
                self.dirty = true;
            }
        }
    }

    fn try_persist(&mut self) -> Result<()> {
        let puzzle = serde_json::to_string(&self.puzzle)?;
        let started = serde_json::to_string(&self.started)?;
        let report = serde_json::to_string(&self.report)?;
        let config = serde_json::to_string(&self.config)?;
        self.store.save(PUZZLE_KEY, &puzzle)?;
        self.store.save(STARTED_KEY, &started)?;
        self.store.save(REPORT_KEY, &report)?;
        self.store.save(CONFIG_KEY, &config)?;
        Ok(())
    }
}
