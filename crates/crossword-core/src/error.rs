use thiserror::Error;

use crate::storage::StoreError;

pub type Result<T> = std::result::Result<T, CrosswordError>;

#[derive(Debug, Error)]
pub enum CrosswordError {
    #[error("Not enough usable words: {available} available, {required} required")]
    InsufficientWords { available: usize, required: usize },

    #[error("Placed only {placed} of the {required} required words after {attempts} attempts")]
    GenerationFailed {
        placed: usize,
        required: usize,
        attempts: usize,
    },

    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("Cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("Cell ({row}, {col}) is blocked")]
    BlockedCell { row: usize, col: usize },

    #[error("'{0}' is not a letter")]
    InvalidLetter(char),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrosswordError {
    /// Configuration-level errors that the caller resolves by picking a
    /// smaller target or a different word pool.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientWords { .. } | Self::GenerationFailed { .. } | Self::InvalidConfig(_)
        )
    }
}
