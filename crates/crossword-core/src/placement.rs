//! Word placement by intersection search.
//!
//! Words are laid down one at a time. The first anchors the grid, placed
//! across and centered; every later word must cross at least one word
//! already on the board. Among all valid crossings the engine keeps the one
//! with the most intersections, breaking ties by lowest row, then lowest
//! column, then Across before Down. Words without a valid crossing are
//! skipped.

use crate::error::{CrosswordError, Result};
use crate::grid::Direction;
use crate::word_bank::WordEntry;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use tracing::{debug, trace};

/// A word fixed to a start cell and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl PlacedWord {
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Cells covered by the word
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.delta();
        (0..self.len()).map(move |i| (self.row + dr * i, self.col + dc * i))
    }
}

/// A scored insertion point for a candidate word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionCandidate {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub intersection_count: usize,
}

impl IntersectionCandidate {
    /// Ordering key; the smallest key wins
    fn rank(&self) -> (Reverse<usize>, usize, usize, Direction) {
        (Reverse(self.intersection_count), self.row, self.col, self.direction)
    }
}

/// Working grid used while placing words
#[derive(Debug, Clone)]
struct Board {
    size: usize,
    letters: Vec<Option<char>>,
    across: Vec<bool>,
    down: Vec<bool>,
}

impl Board {
    fn new(size: usize) -> Self {
        Self {
            size,
            letters: vec![None; size * size],
            across: vec![false; size * size],
            down: vec![false; size * size],
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Letter at a signed coordinate; out of bounds reads as empty
    fn letter_at(&self, row: isize, col: isize) -> Option<char> {
        if row < 0 || col < 0 || row as usize >= self.size || col as usize >= self.size {
            return None;
        }
        self.letters[self.index(row as usize, col as usize)]
    }

    fn is_occupied(&self, row: isize, col: isize) -> bool {
        self.letter_at(row, col).is_some()
    }

    fn occupied_by(&self, idx: usize, direction: Direction) -> bool {
        match direction {
            Direction::Across => self.across[idx],
            Direction::Down => self.down[idx],
        }
    }

    /// Score a placement, or `None` if it breaks a placement rule
    fn evaluate(
        &self,
        word: &[char],
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Option<IntersectionCandidate> {
        let len = word.len();
        let (dr, dc) = direction.delta();
        if len == 0 || row + dr * (len - 1) >= self.size || col + dc * (len - 1) >= self.size {
            return None;
        }

        let (row_i, col_i) = (row as isize, col as isize);
        let (dr_i, dc_i) = (dr as isize, dc as isize);
        let len_i = len as isize;

        // No run-on into neighbouring words at either end
        if self.is_occupied(row_i - dr_i, col_i - dc_i)
            || self.is_occupied(row_i + dr_i * len_i, col_i + dc_i * len_i)
        {
            return None;
        }

        let (pr, pc) = direction.perpendicular().delta();
        let (pr, pc) = (pr as isize, pc as isize);
        let mut intersections = 0;

        for (i, &letter) in word.iter().enumerate() {
            let (r, c) = (row + dr * i, col + dc * i);
            let idx = self.index(r, c);
            match self.letters[idx] {
                Some(existing) => {
                    if existing != letter || self.occupied_by(idx, direction) {
                        return None;
                    }
                    intersections += 1;
                }
                None => {
                    let (r, c) = (r as isize, c as isize);
                    if self.is_occupied(r - pr, c - pc) || self.is_occupied(r + pr, c + pc) {
                        return None;
                    }
                }
            }
        }

        Some(IntersectionCandidate {
            row,
            col,
            direction,
            intersection_count: intersections,
        })
    }

    fn place(&mut self, word: &PlacedWord) {
        for ((r, c), letter) in word.positions().zip(word.word.chars()) {
            let idx = self.index(r, c);
            self.letters[idx] = Some(letter);
            match word.direction {
                Direction::Across => self.across[idx] = true,
                Direction::Down => self.down[idx] = true,
            }
        }
    }
}

/// Places candidate words on a square grid
pub struct PlacementEngine {
    size: usize,
}

impl PlacementEngine {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Sort candidates longest first, keeping input order among equals
    pub fn anchor_order(words: &[WordEntry]) -> Vec<WordEntry> {
        let mut order = words.to_vec();
        order.sort_by_key(|e| Reverse(e.len()));
        order
    }

    /// Run one placement pass over `words` in the given order, stopping at
    /// `target` placed words.
    pub fn place(&self, words: &[WordEntry], target: usize) -> Vec<PlacedWord> {
        let mut board = Board::new(self.size);
        let mut placed: Vec<PlacedWord> = Vec::new();

        for entry in words {
            if placed.len() >= target {
                break;
            }
            let letters: Vec<char> = entry.word.chars().collect();
            if letters.is_empty() || letters.len() > self.size {
                trace!(word = %entry.word, "Word does not fit the grid");
                continue;
            }

            let spot = if placed.is_empty() {
                Some(IntersectionCandidate {
                    row: self.size / 2,
                    col: (self.size - letters.len()) / 2,
                    direction: Direction::Across,
                    intersection_count: 0,
                })
            } else {
                self.best_candidate(&board, &placed, &letters)
            };

            match spot {
                Some(spot) => {
                    let word = PlacedWord {
                        word: entry.word.clone(),
                        clue: entry.clue.clone(),
                        row: spot.row,
                        col: spot.col,
                        direction: spot.direction,
                    };
                    trace!(
                        word = %word.word,
                        row = word.row,
                        col = word.col,
                        direction = %word.direction,
                        intersections = spot.intersection_count,
                        "Placed word"
                    );
                    board.place(&word);
                    placed.push(word);
                }
                None => trace!(word = %entry.word, "No valid crossing, skipping"),
            }
        }

        placed
    }

    /// Repeat placement until at least `required` words land, reshuffling
    /// the candidate order between attempts.
    pub fn place_with_retries<R: Rng + ?Sized>(
        &self,
        words: &[WordEntry],
        target: usize,
        required: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Vec<PlacedWord>> {
        let mut order = Self::anchor_order(words);
        let mut best = 0;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                order.shuffle(rng);
                if let Some((idx, _)) = order
                    .iter()
                    .enumerate()
                    .max_by_key(|(i, e)| (e.len(), Reverse(*i)))
                {
                    let anchor = order.remove(idx);
                    order.insert(0, anchor);
                }
            }

            let placed = self.place(&order, target);
            debug!(attempt, placed = placed.len(), required, "Placement attempt finished");
            if placed.len() >= required {
                return Ok(placed);
            }
            best = best.max(placed.len());
        }

        Err(CrosswordError::GenerationFailed {
            placed: best,
            required,
            attempts: max_attempts,
        })
    }

    /// Best valid crossing of `letters` with the words already placed
    fn best_candidate(
        &self,
        board: &Board,
        placed: &[PlacedWord],
        letters: &[char],
    ) -> Option<IntersectionCandidate> {
        let mut best: Option<IntersectionCandidate> = None;

        for existing in placed {
            let direction = existing.direction.perpendicular();
            let (dr, dc) = direction.delta();

            for ((r, c), shared) in existing.positions().zip(existing.word.chars()) {
                for (i, _) in letters.iter().enumerate().filter(|(_, l)| **l == shared) {
                    // The candidate's i-th letter must land on (r, c)
                    let (Some(row), Some(col)) = (r.checked_sub(dr * i), c.checked_sub(dc * i))
                    else {
                        continue;
                    };
                    if let Some(candidate) = board.evaluate(letters, row, col, direction) {
                        if best.map_or(true, |b| candidate.rank() < b.rank()) {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }

        best
    }
}
