use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub const BOARD_SIZE: usize = 8;

/// Disc color. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("BLACK"),
            Self::White => f.write_str("WHITE"),
        }
    }
}

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Color),
}

impl Cell {
    /// Wire encoding shared with the JavaScript side: 0=empty, 1=black, 2=white.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Occupied(Color::Black) => 1,
            Self::Occupied(Color::White) => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Empty),
            1 => Some(Self::Occupied(Color::Black)),
            2 => Some(Self::Occupied(Color::White)),
            _ => None,
        }
    }
}

/// A board coordinate.
///
/// Textual form is a row digit followed by a column letter (`2E`); the
/// column-first form (`E2`) parses to the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, (b'A' + self.col) as char)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Notation(s.to_string());
        let bytes = s.trim().as_bytes();
        let [first, second] = bytes else {
            return Err(invalid());
        };

        let (digit, letter) = if first.is_ascii_digit() {
            (*first, *second)
        } else {
            (*second, *first)
        };
        if !digit.is_ascii_digit() || !letter.is_ascii_alphabetic() {
            return Err(invalid());
        }

        let row = digit - b'0';
        let col = letter.to_ascii_uppercase() - b'A';
        Self::new(row, col).ok_or_else(invalid)
    }
}

/// An attempt to place `color` at (`row`, `col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: u8,
    pub col: u8,
    pub color: Color,
}

impl Move {
    pub fn new(position: Position, color: Color) -> Self {
        Self {
            row: position.row,
            col: position.col,
            color,
        }
    }

    pub fn position(self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.position())
    }
}

/// Snapshot of a game handed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Color,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over. `winner` is `None` on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub black_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_accepts_row_first_and_column_first() {
        let expected = Position { row: 2, col: 4 };

        assert_eq!("2E".parse::<Position>().unwrap(), expected);
        assert_eq!("E2".parse::<Position>().unwrap(), expected);
        assert_eq!("e2".parse::<Position>().unwrap(), expected);
        assert_eq!(expected.to_string(), "2E");
    }

    #[test]
    fn notation_rejects_out_of_range_and_garbage() {
        for input in ["8A", "2I", "22", "EE", "", "2E1", "?3"] {
            assert!(
                input.parse::<Position>().is_err(),
                "`{input}` should not parse"
            );
        }
    }

    #[test]
    fn cell_wire_encoding_round_trips() {
        for cell in [
            Cell::Empty,
            Cell::Occupied(Color::Black),
            Cell::Occupied(Color::White),
        ] {
            assert_eq!(Cell::from_u8(cell.to_u8()), Some(cell));
        }
        assert_eq!(Cell::from_u8(3), None);
    }

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent().opponent(), Color::White);
    }
}
