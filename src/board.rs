use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::types::{BOARD_SIZE, Cell, Color, Move, Position};

const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const GLYPH_EMPTY: char = '□';
const GLYPH_BLACK: char = '○';
const GLYPH_WHITE: char = '●';

/// Othello board state represented by two bitboards (bit `row * 8 + col`).
///
/// `Board` is a `Copy` value: every transition returns a fresh board, so
/// search siblings never observe each other's changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

/// A legal move together with the board it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    pub mv: Move,
    pub board: Board,
}

impl Board {
    /// Creates the initial board:
    /// black at (3,3) and (4,4), white at (3,4) and (4,3).
    pub fn new() -> Self {
        Self {
            black: bit(27) | bit(36),
            white: bit(28) | bit(35),
        }
    }

    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "a square cannot hold two discs");
        Self { black, white }
    }

    /// Rebuilds a board from the `[u8; 64]` wire form produced by `to_array`.
    pub fn from_array(cells: &[u8]) -> Result<Self, ParseError> {
        if cells.len() != NUM_SQUARES {
            return Err(ParseError::Board(format!(
                "expected {NUM_SQUARES} cells, got {}",
                cells.len()
            )));
        }

        let mut board = Self::from_bitboards(0, 0);
        for (pos, &value) in cells.iter().enumerate() {
            match Cell::from_u8(value) {
                Some(Cell::Empty) => {}
                Some(Cell::Occupied(Color::Black)) => board.black |= bit(pos),
                Some(Cell::Occupied(Color::White)) => board.white |= bit(pos),
                None => {
                    return Err(ParseError::Board(format!(
                        "cell {pos} has invalid value {value}"
                    )));
                }
            }
        }
        Ok(board)
    }

    pub fn cell(&self, position: Position) -> Cell {
        let square = bit(position.index());
        if (self.black & square) != 0 {
            Cell::Occupied(Color::Black)
        } else if (self.white & square) != 0 {
            Cell::Occupied(Color::White)
        } else {
            Cell::Empty
        }
    }

    /// Enumerates every legal move for `color` in row-major order, paired with
    /// the resulting board. An empty list means `color` must pass.
    pub fn legal_moves(&self, color: Color) -> Vec<Successor> {
        let occupied = self.black | self.white;
        let mut out = Vec::new();

        for pos in 0..NUM_SQUARES {
            if (occupied & bit(pos)) != 0 {
                continue;
            }
            let mv = Move::new(pos_to_position(pos), color);
            let (board, legal) = self.apply(mv);
            if legal {
                out.push(Successor { mv, board });
            }
        }

        out
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        let (me, opp) = self.sides(color);
        let occupied = me | opp;
        (0..NUM_SQUARES)
            .filter(|&pos| (occupied & bit(pos)) == 0)
            .any(|pos| collect_flips(pos, me, opp) != 0)
    }

    /// Places `mv.color` at the move's square and flips every captured run.
    ///
    /// Returns the new board and whether the move is legal. An illegal move
    /// returns an unchanged copy of `self`; callers must check the flag.
    ///
    /// # Panics
    ///
    /// Panics when the target square is occupied.
    pub fn apply(&self, mv: Move) -> (Board, bool) {
        let flips = self.flips(mv);
        if flips == 0 {
            return (*self, false);
        }

        let (me, opp) = self.sides(mv.color);
        let next_me = me | bit(mv.position().index()) | flips;
        let next_opp = opp & !flips;

        let next = match mv.color {
            Color::Black => Self::from_bitboards(next_me, next_opp),
            Color::White => Self::from_bitboards(next_opp, next_me),
        };
        (next, true)
    }

    /// Returns the mask of discs `mv` would flip; 0 when the move is illegal.
    ///
    /// # Panics
    ///
    /// Panics when the target square is off the board or occupied.
    pub fn flips(&self, mv: Move) -> u64 {
        assert!(
            (mv.row as usize) < BOARD_SIZE && (mv.col as usize) < BOARD_SIZE,
            "move {mv} is off the board"
        );
        let pos = mv.position().index();
        assert!(
            ((self.black | self.white) & bit(pos)) == 0,
            "move {mv} targets an occupied cell"
        );

        let (me, opp) = self.sides(mv.color);
        collect_flips(pos, me, opp)
    }

    /// Occupancy mask of `color`'s discs.
    pub fn discs(&self, color: Color) -> u64 {
        self.sides(color).0
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn occupied_count(&self) -> u8 {
        (self.black | self.white).count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.occupied_count()
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(pos_to_position(pos)).to_u8();
        }
        board
    }

    fn sides(&self, color: Color) -> (u64, u64) {
        match color {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row}")?;
            for col in 0..BOARD_SIZE {
                let glyph = match self.cell(pos_to_position(row * BOARD_SIZE + col)) {
                    Cell::Empty => GLYPH_EMPTY,
                    Cell::Occupied(Color::Black) => GLYPH_BLACK,
                    Cell::Occupied(Color::White) => GLYPH_WHITE,
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses eight rows of `.`, `B` and `W`; whitespace inside a row is ignored.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseError::Board(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::from_bitboards(0, 0);
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(ParseError::Board(format!(
                    "row {row} has {} cells",
                    cells.len()
                )));
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let square = bit(row * BOARD_SIZE + col);
                match ch {
                    '.' => {}
                    'B' | 'b' => board.black |= square,
                    'W' | 'w' => board.white |= square,
                    other => {
                        return Err(ParseError::Board(format!(
                            "unexpected `{other}` at row {row}, column {col}"
                        )));
                    }
                }
            }
        }
        Ok(board)
    }
}

/// Walks all eight directions from `pos`, stepping before testing each square.
/// A run of opponent discs is captured only when a disc of the mover closes it.
fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    let (row, col) = pos_to_row_col(pos);
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                line |= square;
            } else if (me & square) != 0 {
                flips |= line;
                break;
            } else {
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn pos_to_position(pos: usize) -> Position {
    Position {
        row: (pos / BOARD_SIZE) as u8,
        col: (pos % BOARD_SIZE) as u8,
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn black(row: u8, col: u8) -> Move {
        Move::new(at(row, col), Color::Black)
    }

    fn positions_of(board: &Board, color: Color) -> Vec<(u8, u8)> {
        (0..NUM_SQUARES)
            .map(pos_to_position)
            .filter(|&p| board.cell(p) == Cell::Occupied(color))
            .map(|p| (p.row, p.col))
            .collect()
    }

    fn counts_for(board: &Board, mover: Color) -> (u8, u8) {
        let (black, white) = board.count();
        match mover {
            Color::Black => (black, white),
            Color::White => (white, black),
        }
    }

    #[test]
    fn initial_board_has_two_discs_per_color_on_the_diagonals() {
        let board = Board::new();

        assert_eq!(positions_of(&board, Color::Black), vec![(3, 3), (4, 4)]);
        assert_eq!(positions_of(&board, Color::White), vec![(3, 4), (4, 3)]);
        assert_eq!(board.count(), (2, 2));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn black_2e_flips_the_white_disc_below_it() {
        let board = Board::new();

        let (next, legal) = board.apply(black(2, 4));

        assert!(legal);
        assert_eq!(
            positions_of(&next, Color::Black),
            vec![(2, 4), (3, 3), (3, 4), (4, 4)]
        );
        assert_eq!(positions_of(&next, Color::White), vec![(4, 3)]);
        assert_eq!(board, Board::new(), "source board must not change");
    }

    #[test]
    fn initial_black_moves_are_enumerated_in_row_major_order() {
        let moves: Vec<(u8, u8)> = Board::new()
            .legal_moves(Color::Black)
            .iter()
            .map(|s| (s.mv.row, s.mv.col))
            .collect();

        assert_eq!(moves, vec![(2, 4), (3, 5), (4, 2), (5, 3)]);
    }

    #[test]
    fn move_next_to_own_disc_without_a_run_is_illegal() {
        let board = Board::new();

        let (next, legal) = board.apply(black(2, 2));

        assert!(!legal);
        assert_eq!(next, board);
        assert_eq!(board.flips(black(2, 2)), 0);
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn applying_on_an_occupied_cell_panics() {
        let _ = Board::new().apply(black(3, 4));
    }

    #[test]
    fn flips_commit_only_in_directions_closed_by_the_mover() {
        let board: Board = "
            ........
            ..W.....
            ...WB...
            ...W....
            ....B...
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        let (next, legal) = board.apply(black(2, 2));

        assert!(legal);
        assert_eq!(
            positions_of(&next, Color::Black),
            vec![(2, 2), (2, 3), (2, 4), (3, 3), (4, 4)]
        );
        // The run upwards ends on an empty square and stays white.
        assert_eq!(positions_of(&next, Color::White), vec![(1, 2)]);
    }

    #[test]
    fn run_reaching_the_edge_is_not_captured() {
        let board: Board = "
            .WWWWWWW
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();

        assert!(!board.apply(black(0, 0)).1);
        assert!(board.legal_moves(Color::Black).is_empty());
        assert!(!board.has_legal_move(Color::Black));
    }

    #[test]
    fn mover_gains_one_plus_flips_along_a_playout() {
        let mut board = Board::new();
        let mut color = Color::Black;

        for ply in 0..120 {
            let moves = board.legal_moves(color);
            assert_eq!(moves.is_empty(), !board.has_legal_move(color));
            if moves.is_empty() {
                if !board.has_legal_move(color.opponent()) {
                    break;
                }
                color = color.opponent();
                continue;
            }

            for successor in &moves {
                let flipped = board.flips(successor.mv).count_ones() as u8;
                assert!(flipped >= 1, "legal move {} flipped nothing", successor.mv);
                let (mover_before, opp_before) = counts_for(&board, color);
                let (mover_after, opp_after) = counts_for(&successor.board, color);
                assert_eq!(mover_after, mover_before + 1 + flipped);
                assert_eq!(opp_after, opp_before - flipped);
                assert_eq!(successor.board.occupied_count(), board.occupied_count() + 1);
                assert_eq!(board.apply(successor.mv), (successor.board, true));
            }

            board = moves[(ply * 7) % moves.len()].board;
            color = color.opponent();
        }
    }

    #[test]
    fn array_and_text_forms_round_trip() {
        let (board, _) = Board::new().apply(black(2, 4));

        assert_eq!(Board::from_array(&board.to_array()).unwrap(), board);
        assert!(Board::from_array(&[0u8; 10]).is_err());
        assert!(Board::from_array(&[3u8; 64]).is_err());

        let rendered = board.to_string();
        assert!(rendered.starts_with("  A B C D E F G H\n"));
        assert!(rendered.contains("2 □ □ □ □ ○ □ □ □"));
        assert!(rendered.contains("4 □ □ □ ● ○ □ □ □"));
    }
}
