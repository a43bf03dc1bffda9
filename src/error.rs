use std::io;

use crate::types::{Color, Position};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("illegal move: {0}")]
    IllegalMove(Position),
    #[error("{0} has a legal move and cannot pass")]
    PassNotAllowed(Color),
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid move notation `{0}` (expected e.g. 2E or E2)")]
    Notation(String),
    #[error("invalid board layout: {0}")]
    Board(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid depth `{0}`")]
    InvalidDepth(String),
    #[error("unrecognized input `{0}`")]
    Unrecognized(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ConsoleError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("input closed before the game ended")]
    InputClosed,
}
