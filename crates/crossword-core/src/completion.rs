//! Solve-state evaluation over a puzzle snapshot.
//!
//! Every function here is pure: the puzzle is read, never mutated, and
//! results are handed back for the caller to store.

use crate::grid::{Clue, Puzzle, WordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether every cell of `clue` holds the correct letter
pub fn is_word_complete(puzzle: &Puzzle, clue: &Clue) -> bool {
    clue.positions().all(|(r, c)| {
        puzzle
            .cell(r, c)
            .is_some_and(|cell| cell.is_filled_correctly())
    })
}

/// Identifiers of every completed clue, across and down
pub fn completed_word_ids(puzzle: &Puzzle) -> BTreeSet<WordId> {
    puzzle
        .clues()
        .filter(|clue| is_word_complete(puzzle, clue))
        .map(Clue::id)
        .collect()
}

/// Whether every open cell holds the correct letter.
///
/// Checked cell by cell, independently of the clue lists.
pub fn is_puzzle_complete(puzzle: &Puzzle) -> bool {
    puzzle
        .iter_cells()
        .filter(|(_, _, cell)| !cell.is_blocked)
        .all(|(_, _, cell)| cell.is_filled_correctly())
}

/// Whether the cell at (row, col) holds the correct letter
pub fn is_cell_correct(puzzle: &Puzzle, row: usize, col: usize) -> bool {
    puzzle
        .cell(row, col)
        .is_some_and(|cell| cell.is_filled_correctly())
}

/// Copy of `puzzle` whose `is_correct` flags mark the cells belonging to a
/// word in `completed`. Letters and inputs are left untouched.
pub fn refresh_cell_correctness(puzzle: &Puzzle, completed: &BTreeSet<WordId>) -> Puzzle {
    let mut refreshed = puzzle.clone();
    for cell in refreshed.grid.iter_mut().flatten() {
        cell.is_correct = [cell.across, cell.down]
            .into_iter()
            .flatten()
            .any(|id| completed.contains(&id));
    }
    refreshed
}

/// Snapshot of both completion views
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionState {
    pub completed_words: BTreeSet<WordId>,
    pub is_complete: bool,
}

/// Evaluate both completion views at once
pub fn evaluate(puzzle: &Puzzle) -> CompletionState {
    let state = CompletionState {
        completed_words: completed_word_ids(puzzle),
        is_complete: is_puzzle_complete(puzzle),
    };
    debug_assert_eq!(
        state.is_complete,
        state.completed_words.len() == puzzle.word_count(),
        "cell and clue completion disagree"
    );
    state
}

/// Fill counts for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub filled: usize,
    pub correct: usize,
    pub total: usize,
    pub words_completed: usize,
    pub words_total: usize,
}

impl Progress {
    pub fn percent(&self) -> f32 {
        if self.total > 0 {
            self.correct as f32 / self.total as f32 * 100.0
        } else {
            0.0
        }
    }
}

pub fn progress(puzzle: &Puzzle) -> Progress {
    let open: Vec<_> = puzzle
        .iter_cells()
        .filter(|(_, _, cell)| !cell.is_blocked)
        .map(|(_, _, cell)| cell)
        .collect();

    Progress {
        filled: open.iter().filter(|c| c.user_input.is_some()).count(),
        correct: open.iter().filter(|c| c.is_filled_correctly()).count(),
        total: open.len(),
        words_completed: completed_word_ids(puzzle).len(),
        words_total: puzzle.word_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, GridBuilder};
    use crate::placement::PlacedWord;

    fn sample() -> Puzzle {
        GridBuilder::new(5).build(&[
            PlacedWord {
                word: "gato".into(),
                clue: "Felino".into(),
                row: 0,
                col: 0,
                direction: Direction::Across,
            },
            PlacedWord {
                word: "toco".into(),
                clue: "Resto de tronco".into(),
                row: 0,
                col: 2,
                direction: Direction::Down,
            },
        ])
    }

    fn fill(puzzle: &mut Puzzle, row: usize, col: usize, letter: char) {
        puzzle.grid[row][col].user_input = Some(letter);
    }

    fn fill_word(puzzle: &mut Puzzle, id: WordId) {
        let clue = puzzle.clue(id).unwrap().clone();
        for ((r, c), letter) in clue.positions().zip(clue.answer.chars()) {
            fill(puzzle, r, c, letter);
        }
    }

    const GATO: WordId = WordId {
        number: 1,
        direction: Direction::Across,
    };
    const TOCO: WordId = WordId {
        number: 2,
        direction: Direction::Down,
    };

    #[test]
    fn test_empty_puzzle_is_incomplete() {
        let puzzle = sample();
        assert!(!is_puzzle_complete(&puzzle));
        assert!(completed_word_ids(&puzzle).is_empty());
    }

    #[test]
    fn test_word_completion_is_case_insensitive() {
        let mut puzzle = sample();
        for (col, letter) in "GaTo".chars().enumerate() {
            fill(&mut puzzle, 0, col, letter);
        }
        let clue = puzzle.clue(GATO).unwrap();
        assert!(is_word_complete(&puzzle, clue));
        assert_eq!(completed_word_ids(&puzzle), BTreeSet::from([GATO]));
    }

    #[test]
    fn test_wrong_letter_breaks_both_words() {
        let mut puzzle = sample();
        fill_word(&mut puzzle, GATO);
        fill_word(&mut puzzle, TOCO);
        assert!(is_puzzle_complete(&puzzle));

        fill(&mut puzzle, 0, 2, 'x');
        assert!(!is_puzzle_complete(&puzzle));
        assert!(completed_word_ids(&puzzle).is_empty());
    }

    #[test]
    fn test_complete_iff_all_words_complete() {
        let mut puzzle = sample();
        fill_word(&mut puzzle, GATO);
        let state = evaluate(&puzzle);
        assert!(!state.is_complete);
        assert_eq!(state.completed_words.len(), 1);

        fill_word(&mut puzzle, TOCO);
        let state = evaluate(&puzzle);
        assert!(state.is_complete);
        assert_eq!(state.completed_words.len(), puzzle.word_count());
    }

    #[test]
    fn test_refresh_marks_only_completed_cells() {
        let mut puzzle = sample();
        fill_word(&mut puzzle, TOCO);
        let refreshed = refresh_cell_correctness(&puzzle, &completed_word_ids(&puzzle));

        for (r, c, cell) in refreshed.iter_cells() {
            let expected = c == 2 && r < 4;
            assert_eq!(cell.is_correct, expected, "cell ({}, {})", r, c);
        }
        // Letters and inputs are untouched
        assert_eq!(refreshed.cleared(), puzzle.cleared());
        assert_eq!(refreshed.grid[1][2].user_input, Some('o'));
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut puzzle = sample();
        fill_word(&mut puzzle, GATO);
        let completed = completed_word_ids(&puzzle);
        let once = refresh_cell_correctness(&puzzle, &completed);
        let twice = refresh_cell_correctness(&once, &completed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_refresh_clears_stale_flags() {
        let mut puzzle = sample();
        fill_word(&mut puzzle, GATO);
        let marked = refresh_cell_correctness(&puzzle, &completed_word_ids(&puzzle));
        let cleared = refresh_cell_correctness(&marked, &BTreeSet::new());
        assert!(cleared.iter_cells().all(|(_, _, c)| !c.is_correct));
    }

    #[test]
    fn test_progress_counts() {
        let mut puzzle = sample();
        fill_word(&mut puzzle, GATO);
        fill(&mut puzzle, 1, 2, 'x');

        let p = progress(&puzzle);
        assert_eq!(p.total, 7);
        assert_eq!(p.filled, 5);
        assert_eq!(p.correct, 4);
        assert_eq!(p.words_completed, 1);
        assert_eq!(p.words_total, 2);
    }

    #[test]
    fn test_cell_correctness() {
        let mut puzzle = sample();
        fill(&mut puzzle, 0, 0, 'G');
        assert!(is_cell_correct(&puzzle, 0, 0));
        assert!(!is_cell_correct(&puzzle, 0, 1));
        assert!(!is_cell_correct(&puzzle, 4, 4));
        assert!(!is_cell_correct(&puzzle, 9, 9));
    }
}
