pub mod new;
pub mod play;
pub mod show;

use crate::error::{CliError, Result};
use crate::stats::StatsRecorder;
use crossword_core::{FileStore, GeneratorConfig, KeyValueStore, Session, WordBank};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Store key remembering the word list the current puzzle came from
const WORD_LIST_KEY: &str = "crossword-word-list";

/// Shared state for every subcommand
#[derive(Debug, Clone)]
pub struct Context {
    pub data_dir: PathBuf,
}

impl Context {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("crossword")
        });
        Self { data_dir }
    }

    fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    fn sink(&self) -> Box<StatsRecorder> {
        Box::new(StatsRecorder::new(&self.data_dir))
    }

    /// Generate a new puzzle, replacing any saved one
    pub fn start_session(
        &self,
        bank: WordBank,
        word_list: Option<&Path>,
        config: &GeneratorConfig,
    ) -> Result<Session<FileStore>> {
        debug!(dir = %self.data_dir.display(), "Starting session");
        let session = Session::start(self.store(), bank, self.sink(), config)?;

        let mut store = self.store();
        match word_list {
            Some(path) => store.save(WORD_LIST_KEY, &serde_json::to_string(path)?)?,
            None => store.remove(WORD_LIST_KEY)?,
        }
        Ok(session)
    }

    /// Resume the saved puzzle. A damaged save is regenerated from the
    /// word list and settings of the previous `new`.
    pub fn resume(&self) -> Result<Session<FileStore>> {
        debug!(dir = %self.data_dir.display(), "Opening session");
        let bank = self.saved_bank();
        Ok(Session::restore(
            self.store(),
            bank,
            self.sink(),
            &GeneratorConfig::standard(),
        )?)
    }

    fn saved_bank(&self) -> WordBank {
        let path = match self.store().load(WORD_LIST_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PathBuf>(&raw) {
                Ok(path) => path,
                Err(e) => {
                    warn!("Ignoring unreadable word list setting: {}", e);
                    return WordBank::embedded();
                }
            },
            Ok(None) => return WordBank::embedded(),
            Err(e) => {
                warn!("Could not read word list setting: {}", e);
                return WordBank::embedded();
            }
        };
        match load_word_list(&path) {
            Ok(bank) => bank,
            Err(e) => {
                warn!("Falling back to the built-in words: {}", e);
                WordBank::embedded()
            }
        }
    }
}

/// Load a `word|clue` list, rejecting files with no usable entries
pub fn load_word_list(path: &Path) -> Result<WordBank> {
    let bank = WordBank::load_from_file(path).map_err(|source| CliError::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    if bank.is_empty() {
        return Err(CliError::Argument(format!(
            "word list '{}' has no usable entries",
            path.display()
        )));
    }
    Ok(bank)
}
