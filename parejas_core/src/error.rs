use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidCell,
    #[error("Not a valid board layout")]
    InvalidBoard,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = std::result::Result<T, GameError>;
