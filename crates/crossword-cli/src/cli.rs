use clap::{Args, Parser, Subcommand, ValueEnum};
use crossword_core::GeneratorConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Generate and solve crossword puzzles in the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Directory holding the saved puzzle and statistics
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discard the current puzzle and generate a new one
    New(NewArgs),
    /// Print the current puzzle and its clues
    Show(ShowArgs),
    /// Enter a letter into a cell
    Fill(FillArgs),
    /// Erase the letter in a cell
    Clear(CellArgs),
    /// Reveal the correct letter of a cell (counts as a hint)
    Reveal(CellArgs),
    /// Show progress on the current puzzle
    Status,
    /// Show lifetime statistics
    Stats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 9x9 grid, up to 6 words
    Small,
    /// 13x13 grid, up to 10 words
    #[default]
    Standard,
    /// 17x17 grid, up to 16 words
    Large,
}

impl Preset {
    pub fn config(self) -> GeneratorConfig {
        match self {
            Preset::Small => GeneratorConfig::small(),
            Preset::Standard => GeneratorConfig::standard(),
            Preset::Large => GeneratorConfig::large(),
        }
    }
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Base configuration to start from
    #[arg(short, long, value_enum, default_value_t = Preset::Standard)]
    pub preset: Preset,

    /// Override the grid size
    #[arg(long, value_name = "N")]
    pub size: Option<usize>,

    /// Override the target number of words
    #[arg(short, long, value_name = "N")]
    pub words: Option<usize>,

    /// Override the minimum word length
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Seed for a reproducible puzzle
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Word list file with one `word|clue` pair per line
    #[arg(long, value_name = "PATH")]
    pub word_list: Option<PathBuf>,
}

impl NewArgs {
    /// Preset with command-line overrides applied
    pub fn config(&self) -> GeneratorConfig {
        let mut config = self.preset.config();
        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(words) = self.words {
            config.target_word_count = words;
        }
        if let Some(min_length) = self.min_length {
            config.min_word_length = min_length;
        }
        config.seed = self.seed;
        config
    }
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the solution instead of the player's entries
    #[arg(long)]
    pub solution: bool,
}

/// A cell position, 1-based as printed by `show`
#[derive(Args, Debug, Clone, Copy)]
pub struct CellArgs {
    /// Row number (1-based)
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub row: u16,

    /// Column number (1-based)
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub col: u16,
}

impl CellArgs {
    /// Zero-based grid coordinates
    pub fn position(&self) -> (usize, usize) {
        (self.row as usize - 1, self.col as usize - 1)
    }
}

#[derive(Args, Debug)]
pub struct FillArgs {
    #[command(flatten)]
    pub cell: CellArgs,

    /// Letter to enter
    pub letter: char,
}
