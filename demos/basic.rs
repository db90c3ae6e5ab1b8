//! Basic example of using the crossword engine

use crossword_core::{completion, generate_puzzle, GeneratorConfig};

fn main() {
    println!("Generating a standard puzzle...\n");
    let config = GeneratorConfig::standard().with_seed(2024);
    let mut puzzle = match generate_puzzle(&config) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return;
        }
    };

    println!("Solution:");
    println!("{}", puzzle);

    println!("Across:");
    for clue in &puzzle.across_clues {
        println!("{:>3}. {} ({})", clue.number, clue.text, clue.length);
    }
    println!("Down:");
    for clue in &puzzle.down_clues {
        println!("{:>3}. {} ({})", clue.number, clue.text, clue.length);
    }

    // Fill in the first across answer
    let clue = puzzle.across_clues[0].clone();
    for ((r, c), letter) in clue.positions().zip(clue.answer.chars()) {
        puzzle.grid[r][c].user_input = Some(letter);
    }

    let completed = completion::completed_word_ids(&puzzle);
    let progress = completion::progress(&puzzle);
    println!(
        "\nAfter filling {}: {} of {} words complete, solved: {}",
        clue.id(),
        completed.len(),
        progress.words_total,
        completion::is_puzzle_complete(&puzzle)
    );
}
