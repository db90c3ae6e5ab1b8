use crate::error::{CrosswordError, Result};
use crate::grid::{GridBuilder, Puzzle};
use crate::placement::PlacementEngine;
use crate::word_bank::WordBank;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Width and height of the grid
    pub grid_size: usize,
    /// Stop once this many words are placed
    pub target_word_count: usize,
    /// Shortest word considered
    pub min_word_length: usize,
    /// Fewest placed words for a puzzle to count as generated
    pub min_words: usize,
    /// Placement attempts before giving up
    pub max_attempts: usize,
    /// Candidates drawn from the bank per target word
    pub pool_factor: usize,
    /// Fixed seed for reproducible puzzles
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl GeneratorConfig {
    pub fn small() -> Self {
        Self {
            grid_size: 9,
            target_word_count: 6,
            ..Self::standard()
        }
    }

    pub fn standard() -> Self {
        Self {
            grid_size: 13,
            target_word_count: 10,
            min_word_length: 3,
            min_words: 2,
            max_attempts: 20,
            pool_factor: 3,
            seed: None,
        }
    }

    pub fn large() -> Self {
        Self {
            grid_size: 17,
            target_word_count: 16,
            ..Self::standard()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 3 {
            return Err(CrosswordError::InvalidConfig(format!(
                "grid size {} is below the minimum of 3",
                self.grid_size
            )));
        }
        if self.target_word_count == 0 {
            return Err(CrosswordError::InvalidConfig(
                "target word count must be at least 1".to_string(),
            ));
        }
        if self.min_word_length == 0 || self.min_word_length > self.grid_size {
            return Err(CrosswordError::InvalidConfig(format!(
                "minimum word length {} does not fit a {}x{} grid",
                self.min_word_length, self.grid_size, self.grid_size
            )));
        }
        if self.max_attempts == 0 {
            return Err(CrosswordError::InvalidConfig(
                "at least one placement attempt is required".to_string(),
            ));
        }
        Ok(())
    }

    fn pool_size(&self) -> usize {
        self.target_word_count
            .saturating_mul(self.pool_factor.max(1))
    }
}

/// Crossword puzzle generator
pub struct Generator {
    bank: WordBank,
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(WordBank::embedded())
    }
}

impl Generator {
    /// Create a generator over `bank` with the default configuration
    pub fn new(bank: WordBank) -> Self {
        Self::with_config(bank, GeneratorConfig::default())
    }

    /// Create a generator with a custom configuration
    pub fn with_config(bank: WordBank, config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { bank, config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    /// Generate a puzzle with the current configuration
    #[instrument(skip(self), fields(size = self.config.grid_size, target = self.config.target_word_count))]
    pub fn generate(&mut self) -> Result<Puzzle> {
        self.config.validate()?;
        let config = &self.config;

        let candidates = self.bank.select_words(
            config.pool_size(),
            config.min_word_length,
            config.grid_size,
            &mut self.rng,
        )?;

        // A bank smaller than `min_words` can still fill a puzzle with every word
        let required = config
            .min_words
            .min(self.bank.len())
            .min(config.target_word_count)
            .max(1);
        let engine = PlacementEngine::new(config.grid_size);
        let placed = engine.place_with_retries(
            &candidates,
            config.target_word_count,
            required,
            config.max_attempts,
            &mut self.rng,
        )?;

        let puzzle = GridBuilder::new(config.grid_size).build(&placed);
        info!(
            words = puzzle.word_count(),
            across = puzzle.across_clues.len(),
            down = puzzle.down_clues.len(),
            "Generated puzzle"
        );
        Ok(puzzle)
    }
}

/// Generate a puzzle from the embedded word bank
pub fn generate_puzzle(config: &GeneratorConfig) -> Result<Puzzle> {
    Generator::with_config(WordBank::embedded(), config.clone()).generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_standard() {
        let puzzle = generate_puzzle(&GeneratorConfig::standard().with_seed(42)).unwrap();
        assert_eq!(puzzle.size, 13);
        assert!(puzzle.word_count() >= 2);
        assert!(puzzle.word_count() <= 10);
        assert_eq!(puzzle.validate(), Ok(()));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let config = GeneratorConfig::small().with_seed(7);
        let a = generate_puzzle(&config).unwrap();
        let b = generate_puzzle(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_puzzle_has_no_input() {
        let puzzle = generate_puzzle(&GeneratorConfig::small().with_seed(1)).unwrap();
        assert!(puzzle
            .iter_cells()
            .all(|(_, _, c)| c.user_input.is_none() && !c.is_correct));
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            GeneratorConfig {
                grid_size: 2,
                ..GeneratorConfig::standard()
            },
            GeneratorConfig {
                target_word_count: 0,
                ..GeneratorConfig::standard()
            },
            GeneratorConfig {
                min_word_length: 0,
                ..GeneratorConfig::standard()
            },
            GeneratorConfig {
                min_word_length: 14,
                ..GeneratorConfig::standard()
            },
            GeneratorConfig {
                max_attempts: 0,
                ..GeneratorConfig::standard()
            },
        ];
        for config in cases {
            let err = generate_puzzle(&config).unwrap_err();
            assert!(matches!(err, CrosswordError::InvalidConfig(_)), "{:?}", config);
            assert!(err.is_configuration_error());
        }
    }

    #[test]
    fn test_no_crossing_words_fail() {
        let bank = WordBank::from_pairs(&[("sol", "Estrela"), ("mar", "Oceano")]);
        let config = GeneratorConfig {
            grid_size: 7,
            max_attempts: 3,
            ..GeneratorConfig::standard().with_seed(5)
        };
        let err = Generator::with_config(bank, config).generate().unwrap_err();
        assert!(matches!(err, CrosswordError::GenerationFailed { attempts: 3, .. }));
    }

    #[test]
    fn test_presets_scale() {
        let small = GeneratorConfig::small();
        let large = GeneratorConfig::large();
        assert!(small.grid_size < GeneratorConfig::standard().grid_size);
        assert!(large.target_word_count > GeneratorConfig::standard().target_word_count);
        assert!(small.validate().is_ok() && large.validate().is_ok());
    }
}
