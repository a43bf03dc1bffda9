pub mod ai;
pub mod board;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::{Board, Successor};
pub use types::{Color, Move, Position};
