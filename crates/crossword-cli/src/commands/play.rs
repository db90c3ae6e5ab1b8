use super::Context;
use crate::cli::{CellArgs, FillArgs};
use crate::error::Result;
use crate::render;
use crossword_core::{EditOutcome, FileStore, Session};

pub fn fill(ctx: &Context, args: &FillArgs) -> Result<()> {
    let (row, col) = args.cell.position();
    let mut session = ctx.resume()?;
    let outcome = session.set_input(row, col, args.letter)?;
    report(&session, &outcome);
    Ok(())
}

pub fn clear(ctx: &Context, args: &CellArgs) -> Result<()> {
    let (row, col) = args.position();
    let mut session = ctx.resume()?;
    let outcome = session.clear_input(row, col)?;
    report(&session, &outcome);
    Ok(())
}

pub fn reveal(ctx: &Context, args: &CellArgs) -> Result<()> {
    let (row, col) = args.position();
    let mut session = ctx.resume()?;
    let outcome = session.reveal_cell(row, col)?;
    if let Some(cell) = session.puzzle().cell(row, col) {
        println!("Cell {},{} is '{}'.", args.row, args.col, cell.letter.to_ascii_uppercase());
    }
    report(&session, &outcome);
    Ok(())
}

fn report(session: &Session<FileStore>, outcome: &EditOutcome) {
    let puzzle = session.puzzle();
    for id in &outcome.newly_completed {
        if let Some(clue) = puzzle.clue(*id) {
            println!("Completed {}: {}", id, clue.answer.to_ascii_uppercase());
        }
    }
    if outcome.puzzle_completed {
        println!("Puzzle solved!");
    }
    println!("{}", render::progress_line(&session.progress(), session.hints_used()));
    if session.has_unsaved_changes() {
        eprintln!("Warning: progress could not be saved.");
    }
}
