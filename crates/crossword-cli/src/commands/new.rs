use super::{load_word_list, Context};
use crate::cli::NewArgs;
use crate::error::Result;
use crate::render;
use crate::theme::Theme;
use crossword_core::WordBank;
use std::io;
use tracing::info;

pub fn run(ctx: &Context, args: &NewArgs) -> Result<()> {
    // Resolved so later commands find the list from any directory
    let word_list = args
        .word_list
        .as_ref()
        .map(|path| path.canonicalize().unwrap_or_else(|_| path.clone()));
    let bank = match &word_list {
        Some(path) => {
            let bank = load_word_list(path)?;
            info!(words = bank.len(), path = %path.display(), "Loaded word list");
            bank
        }
        None => WordBank::embedded(),
    };

    let config = args.config();
    config.validate()?;

    let session = ctx.start_session(bank, word_list.as_deref(), &config)?;

    let puzzle = session.puzzle();
    println!(
        "New {}x{} puzzle with {} words.\n",
        puzzle.size,
        puzzle.size,
        puzzle.word_count()
    );

    let theme = Theme::default();
    let mut stdout = io::stdout();
    render::render_grid(&mut stdout, puzzle, &theme, false)?;
    render::render_clues(&mut stdout, puzzle, session.completed_words(), &theme)?;
    Ok(())
}
