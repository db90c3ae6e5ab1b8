//! Crossword grid types and the builder that turns placements into a puzzle.

use crate::placement::PlacedWord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Letter stored in blocked cells
pub const BLOCKED: char = ' ';

/// Placement direction of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Row/column step for this direction
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "Across"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// Identifies a clue: its number plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId {
    pub number: u32,
    pub direction: Direction,
}

impl WordId {
    pub fn new(number: u32, direction: Direction) -> Self {
        Self { number, direction }
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.direction)
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub letter: char,
    pub is_blocked: bool,
    pub number: Option<u32>,
    pub user_input: Option<char>,
    pub across: Option<WordId>,
    pub down: Option<WordId>,
    /// Display-only: the cell belongs to at least one completed word
    #[serde(default)]
    pub is_correct: bool,
}

impl Cell {
    pub fn blocked() -> Self {
        Self {
            letter: BLOCKED,
            is_blocked: true,
            number: None,
            user_input: None,
            across: None,
            down: None,
            is_correct: false,
        }
    }

    /// Word of the given direction passing through this cell
    pub fn word(&self, direction: Direction) -> Option<WordId> {
        match direction {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }

    /// Whether the player's input matches the solution letter
    pub fn is_filled_correctly(&self) -> bool {
        !self.is_blocked
            && self
                .user_input
                .is_some_and(|c| c.eq_ignore_ascii_case(&self.letter))
    }
}

/// A numbered clue and the answer it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    pub number: u32,
    pub text: String,
    pub answer: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Clue {
    pub fn id(&self) -> WordId {
        WordId::new(self.number, self.direction)
    }

    /// Grid coordinates covered by the answer, in reading order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.delta();
        (0..self.length).map(move |i| (self.start_row + dr * i, self.start_col + dc * i))
    }
}

/// A generated crossword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub grid: Vec<Vec<Cell>>,
    pub across_clues: Vec<Clue>,
    pub down_clues: Vec<Clue>,
    pub size: usize,
}

impl Puzzle {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row).and_then(|r| r.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.grid.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// All clues, across first
    pub fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.across_clues.iter().chain(self.down_clues.iter())
    }

    pub fn clue(&self, id: WordId) -> Option<&Clue> {
        let list = match id.direction {
            Direction::Across => &self.across_clues,
            Direction::Down => &self.down_clues,
        };
        list.iter().find(|c| c.number == id.number)
    }

    pub fn word_count(&self) -> usize {
        self.across_clues.len() + self.down_clues.len()
    }

    /// Cells covered by a clue. Positions outside the grid are skipped.
    pub fn cells_of<'a>(&'a self, clue: &'a Clue) -> impl Iterator<Item = &'a Cell> + 'a {
        clue.positions().filter_map(move |(r, c)| self.cell(r, c))
    }

    /// Iterate over every cell with its coordinates
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    /// Copy of this puzzle with every player input and correctness flag cleared
    pub fn cleared(&self) -> Self {
        let mut puzzle = self.clone();
        for cell in puzzle.grid.iter_mut().flatten() {
            cell.user_input = None;
            cell.is_correct = false;
        }
        puzzle
    }

    /// Check structural well-formedness.
    ///
    /// Used to vet persisted documents before trusting them.
    pub fn validate(&self) -> Result<(), String> {
        if self.size == 0 || self.grid.len() != self.size {
            return Err(format!("grid has {} rows, expected {}", self.grid.len(), self.size));
        }
        if let Some(row) = self.grid.iter().position(|r| r.len() != self.size) {
            return Err(format!("row {} is not {} cells wide", row, self.size));
        }

        for (direction, list) in [
            (Direction::Across, &self.across_clues),
            (Direction::Down, &self.down_clues),
        ] {
            if list.windows(2).any(|w| w[0].number >= w[1].number) {
                return Err(format!("{} clues are not sorted by number", direction));
            }
            for clue in list {
                if clue.direction != direction {
                    return Err(format!("clue {} filed under {}", clue.id(), direction));
                }
                if clue.answer.chars().count() != clue.length || clue.length == 0 {
                    return Err(format!("clue {} length mismatch", clue.id()));
                }
                let start = self.cell(clue.start_row, clue.start_col);
                if start.and_then(|c| c.number) != Some(clue.number) {
                    return Err(format!("clue {} start cell is not numbered", clue.id()));
                }
                let (dr, dc) = direction.delta();
                let end_row = clue.start_row + dr * (clue.length - 1);
                let end_col = clue.start_col + dc * (clue.length - 1);
                if end_row >= self.size || end_col >= self.size {
                    return Err(format!("clue {} runs off the grid", clue.id()));
                }
                for ((r, c), expected) in clue.positions().zip(clue.answer.chars()) {
                    let cell = &self.grid[r][c];
                    if cell.is_blocked || cell.letter != expected {
                        return Err(format!("clue {} disagrees with cell ({}, {})", clue.id(), r, c));
                    }
                    if cell.word(direction) != Some(clue.id()) {
                        return Err(format!("cell ({}, {}) not linked to clue {}", r, c, clue.id()));
                    }
                }
            }
        }

        let covered: HashSet<(usize, usize)> = self.clues().flat_map(Clue::positions).collect();
        for (r, c, cell) in self.iter_cells() {
            if !cell.is_blocked && !covered.contains(&(r, c)) {
                return Err(format!("cell ({}, {}) is open but outside every clue", r, c));
            }
            let member = cell.across.is_some() || cell.down.is_some();
            if cell.is_blocked == member {
                return Err(format!("cell ({}, {}) membership does not match blocked state", r, c));
            }
            for id in [cell.across, cell.down].into_iter().flatten() {
                let clue = self
                    .clue(id)
                    .ok_or_else(|| format!("cell ({}, {}) references missing clue {}", r, c, id))?;
                if !clue.positions().any(|pos| pos == (r, c)) {
                    return Err(format!("cell ({}, {}) is not part of clue {}", r, c, id));
                }
            }
            if let Some(number) = cell.number {
                let starts_clue = self
                    .clues()
                    .any(|clue| clue.number == number && (clue.start_row, clue.start_col) == (r, c));
                if !starts_clue {
                    return Err(format!(
                        "cell ({}, {}) has number {} but starts no clue",
                        r, c, number
                    ));
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: String = row
                .iter()
                .map(|cell| {
                    if cell.is_blocked {
                        '#'
                    } else {
                        cell.letter.to_ascii_uppercase()
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Materializes placed words into a numbered puzzle
pub struct GridBuilder {
    size: usize,
}

impl GridBuilder {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Build the puzzle. Placements are assumed valid for this grid size.
    pub fn build(&self, placed: &[PlacedWord]) -> Puzzle {
        let size = self.size;
        let mut grid = vec![vec![Cell::blocked(); size]; size];

        // Letters first; membership needs the numbers assigned below
        let mut starts = vec![vec![(None, None); size]; size];
        for (idx, word) in placed.iter().enumerate() {
            for ((r, c), letter) in word.positions().zip(word.word.chars()) {
                let cell = &mut grid[r][c];
                debug_assert!(cell.is_blocked || cell.letter == letter);
                cell.is_blocked = false;
                cell.letter = letter;
            }
            let slot = &mut starts[word.row][word.col];
            match word.direction {
                Direction::Across => slot.0 = Some(idx),
                Direction::Down => slot.1 = Some(idx),
            }
        }

        let mut across_clues = Vec::new();
        let mut down_clues = Vec::new();
        let mut next_number = 1;

        for row in 0..size {
            for col in 0..size {
                let (across, down) = starts[row][col];
                if across.is_none() && down.is_none() {
                    continue;
                }
                let number = next_number;
                next_number += 1;
                grid[row][col].number = Some(number);

                for idx in [across, down].into_iter().flatten() {
                    let word = &placed[idx];
                    let id = WordId::new(number, word.direction);
                    for (r, c) in word.positions() {
                        match word.direction {
                            Direction::Across => grid[r][c].across = Some(id),
                            Direction::Down => grid[r][c].down = Some(id),
                        }
                    }
                    let clue = Clue {
                        number,
                        text: word.clue.clone(),
                        answer: word.word.clone(),
                        start_row: word.row,
                        start_col: word.col,
                        direction: word.direction,
                        length: word.len(),
                    };
                    match word.direction {
                        Direction::Across => across_clues.push(clue),
                        Direction::Down => down_clues.push(clue),
                    }
                }
            }
        }

        Puzzle {
            grid,
            across_clues,
            down_clues,
            size,
        }
    }
}
