use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("state string is too short")]
    TooShort,
    #[error("state length does not divide into whole rows")]
    RaggedLength,
    #[error("character {0:?} is outside the state alphabet")]
    BadCharacter(char),
    #[error("team code {0} is out of range")]
    BadTeam(u8),
    #[error("tile height {0} is out of range")]
    BadHeight(u8),
    #[error("board dimensions are outside the encodable range")]
    Dimensions,
    #[error("cell count does not match the board dimensions")]
    Shape,
    #[error("coordinates are outside the board")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, BoardError>;
