use tracing::info;

use crate::ai::{Evaluator, SearchReport, Searcher};
use crate::board::{Board, Successor};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::types::{Color, GameResult, GameState, Move, Position};

/// What the side to move may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Moves(Vec<Successor>),
    /// No legal move, but the opponent has one.
    Pass,
    GameOver(GameResult),
}

/// Turn controller: owns the committed board and sequences moves and passes.
pub struct Game {
    board: Board,
    current: Color,
    config: GameConfig,
    is_game_over: bool,
    is_pass: bool,
    flipped: Vec<u8>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(Board::new(), Color::Black, config)
    }

    pub fn with_board(board: Board, current: Color, config: GameConfig) -> Self {
        Self {
            board,
            current,
            config,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn legal_moves(&self) -> Vec<Successor> {
        self.board.legal_moves(self.current)
    }

    /// Classifies the current turn, ending the game when neither side can move.
    pub fn turn(&mut self) -> Turn {
        if !self.is_game_over {
            let moves = self.legal_moves();
            if !moves.is_empty() {
                return Turn::Moves(moves);
            }
            if self.board.has_legal_move(self.current.opponent()) {
                return Turn::Pass;
            }
            self.end_game();
        }
        Turn::GameOver(self.result())
    }

    /// Plays a human-chosen square for the side to move.
    pub fn play(&mut self, position: Position) -> Result<Move, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        let successor = self
            .legal_moves()
            .into_iter()
            .find(|s| s.mv.position() == position)
            .ok_or(GameError::IllegalMove(position))?;

        self.commit(successor);
        Ok(successor.mv)
    }

    /// Lets the searcher choose and commit a move for the side to move.
    pub fn play_machine(&mut self) -> Result<(Move, SearchReport), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        let moves = self.legal_moves();
        let evaluator = self.evaluator();
        let mut searcher = match self.config.time_limit {
            Some(limit) => Searcher::with_timeout(&evaluator, self.config.pruning, limit),
            None => Searcher::new(&evaluator, self.config.pruning),
        };
        let report = searcher.choose(&self.board, self.current, self.config.depth);

        // A non-positive depth returns the board unchanged; play the first move then.
        let successor = moves
            .iter()
            .find(|s| s.board == report.board)
            .or_else(|| moves.first())
            .copied()
            .ok_or(GameError::NoLegalMoves(self.current))?;

        self.commit(successor);
        Ok((successor.mv, report))
    }

    /// Forfeits the turn. Only allowed when the side to move has no legal move.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.board.has_legal_move(self.current) {
            return Err(GameError::PassNotAllowed(self.current));
        }

        info!(color = %self.current, "pass");
        self.is_pass = true;
        self.flipped.clear();
        self.current = self.current.opponent();
        self.end_game_if_blocked();
        Ok(())
    }

    /// Rejects a front-end action taken on behalf of the wrong color.
    pub fn ensure_turn(&self, color: Color) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.current != color {
            return Err(GameError::NotYourTurn(color));
        }
        Ok(())
    }

    /// Raw disc counts and the winner.
    pub fn result(&self) -> GameResult {
        let score = self.evaluator().score(&self.board, false);
        let (black_count, white_count) = (score.black as u8, score.white as u8);
        GameResult {
            winner: if black_count > white_count {
                Some(Color::Black)
            } else if white_count > black_count {
                Some(Color::White)
            } else {
                None
            },
            black_count,
            white_count,
        }
    }

    pub fn state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.config.corner_multiplier)
    }

    fn end_game(&mut self) {
        self.is_game_over = true;
        let result = self.result();
        info!(
            black = result.black_count,
            white = result.white_count,
            "game over"
        );
    }

    fn commit(&mut self, successor: Successor) {
        let flips = self.board.flips(successor.mv);
        info!(mv = %successor.mv, flipped = flips.count_ones(), "move committed");

        self.board = successor.board;
        self.is_pass = false;
        self.flipped = bitmask_to_indices(flips);
        self.current = self.current.opponent();
        self.end_game_if_blocked();
    }

    fn end_game_if_blocked(&mut self) {
        if !self.board.has_legal_move(self.current)
            && !self.board.has_legal_move(self.current.opponent())
        {
            self.end_game();
        }
    }
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}
