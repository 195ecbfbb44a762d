use std::io;
use std::num::ParseIntError;

use thiserror::Error;

use crate::grid::{GridSize, Position};

/// Construction-time failures for game entities.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GameError {
    #[error("initial snake length must be positive")]
    ZeroLength,
    #[error("snake of length {length} does not fit left of {start}")]
    SnakeDoesNotFit { length: usize, start: Position },
    #[error("{position} lies outside the {grid} grid")]
    OutOfBounds { position: Position, grid: GridSize },
    #[error("snake body must contain at least one cell")]
    EmptyBody,
    #[error("snake segments {from} and {to} are not adjacent")]
    DisjointBody { from: Position, to: Position },
    #[error("food at {position} overlaps the snake")]
    FoodOnSnake { position: Position },
    #[error("no free cell left on the board")]
    NoFreeCell,
}

/// Rejected or failed high-score submissions.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score must not be negative (got {0})")]
    NegativeScore(i64),
    #[error("score {0} is too large to store")]
    ScoreOutOfRange(i64),
    #[error("name must not be blank")]
    BlankName,
    #[error("name must not contain commas or line breaks")]
    InvalidName,
    #[error("high-score store I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure to parse one `score,name,date` record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseEntryError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("unexpected extra field")]
    ExtraField,
    #[error("invalid score: {0}")]
    Score(#[from] ParseIntError),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
    #[error("blank name")]
    BlankName,
}
