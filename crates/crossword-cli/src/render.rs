use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use crossword_core::{Clue, Progress, Puzzle, WordId};
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Print the grid with row and column labels.
///
/// Shows the player's entries, or the solution when `solution` is set.
pub fn render_grid<W: Write>(out: &mut W, puzzle: &Puzzle, theme: &Theme, solution: bool) -> io::Result<()> {
    let size = puzzle.size;

    queue!(out, SetForegroundColor(theme.border), Print("    "))?;
    for col in 0..size {
        queue!(out, Print(format!("{:>3}", col + 1)))?;
    }
    queue!(out, Print("\n"))?;
    queue!(out, Print(format!("    +{}\n", "---".repeat(size))))?;

    for (r, row) in puzzle.grid.iter().enumerate() {
        queue!(out, SetForegroundColor(theme.border), Print(format!("{:>3} |", r + 1)))?;
        for cell in row {
            if cell.is_blocked {
                queue!(out, SetForegroundColor(theme.blocked), Print(" ##"))?;
                continue;
            }
            let (text, color) = if solution {
                (cell.letter, theme.solution)
            } else {
                match cell.user_input {
                    Some(c) if cell.is_correct => (c, theme.correct),
                    Some(c) => (c, theme.filled),
                    None => ('.', theme.info),
                }
            };
            queue!(
                out,
                SetForegroundColor(color),
                Print(format!("  {}", text.to_ascii_uppercase()))
            )?;
        }
        queue!(out, Print("\n"))?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

/// Print both clue lists, striking through completed ones
pub fn render_clues<W: Write>(
    out: &mut W,
    puzzle: &Puzzle,
    completed: &BTreeSet<WordId>,
    theme: &Theme,
) -> io::Result<()> {
    for (heading, clues) in [("Across", &puzzle.across_clues), ("Down", &puzzle.down_clues)] {
        if clues.is_empty() {
            continue;
        }
        queue!(
            out,
            Print("\n"),
            SetForegroundColor(theme.info),
            SetAttribute(Attribute::Bold),
            Print(format!("{}\n", heading)),
            SetAttribute(Attribute::Reset)
        )?;
        for clue in clues.iter() {
            render_clue(out, clue, completed.contains(&clue.id()), theme)?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

fn render_clue<W: Write>(out: &mut W, clue: &Clue, done: bool, theme: &Theme) -> io::Result<()> {
    let color = if done { theme.correct } else { Color::Reset };
    queue!(
        out,
        SetForegroundColor(theme.info),
        Print(format!("{:>4}. ", clue.number)),
        SetForegroundColor(color)
    )?;
    if done {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    queue!(
        out,
        Print(format!("{} ({})", clue.text, clue.length)),
        SetAttribute(Attribute::Reset),
        Print("\n")
    )
}

/// One-line progress summary
pub fn progress_line(progress: &Progress, hints: usize) -> String {
    format!(
        "{}/{} cells correct ({:.0}%), {}/{} words, {} hints",
        progress.correct,
        progress.total,
        progress.percent(),
        progress.words_completed,
        progress.words_total,
        hints
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::{generate_puzzle, GeneratorConfig};

    fn strip_ansi(bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for n in chars.by_ref() {
                    if n.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_render_solution_grid() {
        let puzzle = generate_puzzle(&GeneratorConfig::small().with_seed(4)).unwrap();
        let mut buf = Vec::new();
        render_grid(&mut buf, &puzzle, &Theme::default(), true).unwrap();
        let text = strip_ansi(&buf);

        // Header, border, then one line per row
        assert_eq!(text.lines().count(), puzzle.size + 2);
        let clue = &puzzle.across_clues[0];
        let row_line = text.lines().nth(clue.start_row + 2).unwrap();
        let letters: String = row_line.chars().filter(|c| c.is_ascii_uppercase()).collect();
        assert!(letters.contains(&clue.answer.to_ascii_uppercase()));
    }

    #[test]
    fn test_unfinished_letters_are_plain() {
        let mut puzzle = generate_puzzle(&GeneratorConfig::small().with_seed(4)).unwrap();
        let clue = puzzle.across_clues[0].clone();
        let (r, c) = (clue.start_row, clue.start_col);
        let wrong = if puzzle.grid[r][c].letter == 'z' { 'y' } else { 'z' };
        puzzle.grid[r][c].user_input = Some(wrong);

        let mut buf = Vec::new();
        render_grid(&mut buf, &puzzle, &Theme::default(), false).unwrap();
        let raw = String::from_utf8(buf).unwrap();
        let expected = format!("\x1b[39m  {}", wrong.to_ascii_uppercase());
        assert!(raw.contains(&expected), "{:?}", raw);
    }

    #[test]
    fn test_render_clues_lists_every_clue() {
        let puzzle = generate_puzzle(&GeneratorConfig::small().with_seed(4)).unwrap();
        let mut buf = Vec::new();
        render_clues(&mut buf, &puzzle, &BTreeSet::new(), &Theme::default()).unwrap();
        let text = strip_ansi(&buf);
        for clue in puzzle.clues() {
            assert!(text.contains(&clue.text));
        }
    }

    #[test]
    fn test_progress_line() {
        let progress = Progress {
            filled: 5,
            correct: 4,
            total: 8,
            words_completed: 1,
            words_total: 3,
        };
        assert_eq!(progress_line(&progress, 2), "4/8 cells correct (50%), 1/3 words, 2 hints");
    }
}
