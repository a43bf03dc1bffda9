use crate::board::Board;
use crate::types::{BOARD_SIZE, Color};

const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
const LAST: usize = BOARD_SIZE - 1;

/// Corner emphasis used unless configured otherwise.
pub const DEFAULT_CORNER_MULTIPLIER: i32 = 4;
/// Keeps a full board of corner-weighted discs well inside `i32`.
pub const MAX_CORNER_MULTIPLIER: i32 = 1_000;

/// Per-color totals produced by [`Evaluator::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub white: i32,
    pub black: i32,
}

impl Score {
    pub fn of(self, color: Color) -> i32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// `color`'s total minus its opponent's; positive favors `color`.
    pub fn relative(self, color: Color) -> i32 {
        self.of(color) - self.of(color.opponent())
    }
}

/// Piece count plus positional weighting.
///
/// Each disc is worth 1. With weighting, a disc on row 0 or 7 earns a bonus
/// of 1; a disc on column 0 or 7 then has its bonus multiplied by the corner
/// multiplier and incremented, so corners dominate plain edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    corner_multiplier: i32,
    weights: [i32; BOARD_CELLS],
}

impl Evaluator {
    /// `corner_multiplier` is clamped to `0..=MAX_CORNER_MULTIPLIER`.
    pub fn new(corner_multiplier: i32) -> Self {
        let corner_multiplier = corner_multiplier.clamp(0, MAX_CORNER_MULTIPLIER);
        let mut weights = [0i32; BOARD_CELLS];
        for (pos, weight) in weights.iter_mut().enumerate() {
            *weight = 1 + positional_bonus(pos / BOARD_SIZE, pos % BOARD_SIZE, corner_multiplier);
        }
        Self {
            corner_multiplier,
            weights,
        }
    }

    pub fn corner_multiplier(&self) -> i32 {
        self.corner_multiplier
    }

    /// Scores both colors. `weighted == false` yields raw disc counts.
    pub fn score(&self, board: &Board, weighted: bool) -> Score {
        Score {
            white: self.total(board.discs(Color::White), weighted),
            black: self.total(board.discs(Color::Black), weighted),
        }
    }

    /// Weighted value of `board` from `color`'s perspective.
    pub fn evaluate(&self, board: &Board, color: Color) -> i32 {
        self.score(board, true).relative(color)
    }

    fn total(&self, mask: u64, weighted: bool) -> i32 {
        if !weighted {
            return mask.count_ones() as i32;
        }

        let mut bits = mask;
        let mut sum = 0;
        while bits != 0 {
            sum += self.weights[bits.trailing_zeros() as usize];
            bits &= bits - 1;
        }
        sum
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_CORNER_MULTIPLIER)
    }
}

fn positional_bonus(row: usize, col: usize, corner_multiplier: i32) -> i32 {
    let mut bonus = 0;
    if row == 0 || row == LAST {
        bonus += 1;
    }
    if col == 0 || col == LAST {
        bonus *= corner_multiplier;
        bonus += 1;
    }
    bonus
}
