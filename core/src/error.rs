use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board colors do not match the configured card counts")]
    InvalidColorCounts,
    #[error("Card counts do not fill the board")]
    InvalidConfig,
    #[error("Not enough words to deal a board, need {required} but only {available} are usable")]
    InsufficientWords { available: usize, required: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
