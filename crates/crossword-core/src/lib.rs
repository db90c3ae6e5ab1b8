//! Crossword engine
//!
//! Generates interlocking crossword puzzles from a word bank and tracks the
//! player's progress through them.
//!
//! ```no_run
//! use crossword_core::{generate_puzzle, completion, GeneratorConfig};
//!
//! let puzzle = generate_puzzle(&GeneratorConfig::standard()).unwrap();
//! println!("{}", puzzle);
//! assert!(!completion::is_puzzle_complete(&puzzle));
//! ```

pub mod completion;
mod error;
mod generator;
mod grid;
mod placement;
mod session;
mod storage;
mod word_bank;


pub use completion::{CompletionState, Progress};
pub use error::{CrosswordError, Result};
pub use generator::{generate_puzzle, Generator, GeneratorConfig};
pub use grid::{Cell, Clue, Direction, GridBuilder, Puzzle, WordId, BLOCKED};
pub use placement::{IntersectionCandidate, PlacedWord, PlacementEngine};
pub use session::{
    CompletionReport, EditOutcome, NullSink, ResultsSink, Session, CONFIG_KEY, PUZZLE_KEY,
    REPORT_KEY, STARTED_KEY,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use word_bank::{fold_letter, normalize_word, WordBank, WordEntry, MIN_USABLE_WORDS};
