use super::Context;
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::render;
use crate::stats::StatsRecorder;
use crate::theme::Theme;
use std::io;

pub fn show(ctx: &Context, args: &ShowArgs) -> Result<()> {
    let session = ctx.resume()?;
    let puzzle = session.puzzle();
    let theme = Theme::default();
    let mut stdout = io::stdout();

    render::render_grid(&mut stdout, puzzle, &theme, args.solution)?;
    render::render_clues(&mut stdout, puzzle, session.completed_words(), &theme)?;
    println!();
    println!("{}", render::progress_line(&session.progress(), session.hints_used()));
    Ok(())
}

pub fn status(ctx: &Context) -> Result<()> {
    let session = ctx.resume()?;
    let puzzle = session.puzzle();
    println!("Puzzle: {}x{}, {} words", puzzle.size, puzzle.size, puzzle.word_count());
    println!("Started: {}", if session.is_started() { "yes" } else { "no" });
    println!("Solved: {}", if session.is_complete() { "yes" } else { "no" });
    println!("{}", render::progress_line(&session.progress(), session.hints_used()));
    Ok(())
}

pub fn stats(ctx: &Context) -> Result<()> {
    let recorder = StatsRecorder::new(&ctx.data_dir);
    let stats = recorder.stats();
    println!("Puzzles completed: {}", stats.puzzles_completed);
    println!("Clean solves:      {}", stats.clean_solves);
    println!("Words completed:   {}", stats.words_completed);
    println!("Hints used:        {}", stats.hints_used);
    if let Some(ts) = stats.last_completed {
        println!("Last completed:    {} (unix time)", ts);
    }
    Ok(())
}
