use crate::game::pieces::Color;
use crate::game::square::{BoardSquare, BoardSquareExt};
use std::fmt;

/// Failures while building a board. None of these are recoverable: the game
/// cannot start on a half-built registry.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    InvalidNeighbor(i8, i8), // computed adjacency fell off the board (file, rank)
    InvalidFen(String),
    MissingKing(Color),
    DuplicateKing(Color),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidNeighbor(file, rank) => {
                write!(f, "adjacency computed an off-board square ({}, {})", file, rank)
            }
            SetupError::InvalidFen(reason) => write!(f, "invalid FEN: {}", reason),
            SetupError::MissingKing(color) => write!(f, "no {} king on the board", color),
            SetupError::DuplicateKing(color) => write!(f, "more than one {} king", color),
        }
    }
}

impl std::error::Error for SetupError {}

/// Reasons a move or selection is refused. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveError {
    InvalidSquare,
    EmptySource(BoardSquare),
    WrongTurn(Color),
    NoPieceFocused,
    IllegalDestination(BoardSquare, BoardSquare),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidSquare => write!(f, "not a square on the board"),
            MoveError::EmptySource(square) => write!(f, "no piece on {}", square.unparse()),
            MoveError::WrongTurn(color) => write!(f, "it is {}'s turn", color),
            MoveError::NoPieceFocused => write!(f, "no piece is selected"),
            MoveError::IllegalDestination(from, to) => {
                write!(f, "{} cannot move to {}", from.unparse(), to.unparse())
            }
        }
    }
}

impl std::error::Error for MoveError {}
