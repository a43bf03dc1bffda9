use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

use crate::ai::eval::Evaluator;
use crate::board::Board;
use crate::types::Color;

pub const MIN_SCORE: i32 = i32::MIN;
pub const MAX_SCORE: i32 = i32::MAX;

/// Result of a single fixed-depth search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Heuristic value from the root color's perspective.
    pub value: i32,
    /// Chosen child board; the searched board itself at a terminal node.
    pub board: Board,
    pub nodes: u64,
}

/// What [`Searcher::choose`] settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub value: i32,
    pub board: Board,
    /// Nodes visited across every iteration, including an abandoned one.
    pub nodes: u64,
    /// Deepest fully completed depth.
    pub depth: i32,
    pub timed_out: bool,
}

/// Minimax with optional alpha-beta pruning.
///
/// Plies alternate strictly between the maximizing root color and its
/// opponent; a side without a legal move ends the line and is scored as a leaf.
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    pruning: bool,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    timed_out: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator, pruning: bool) -> Self {
        Self {
            evaluator,
            pruning,
            timeout: None,
            deadline: None,
            timed_out: false,
        }
    }

    pub fn with_timeout(evaluator: &'a Evaluator, pruning: bool, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::new(evaluator, pruning)
        }
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Fixed-depth search from `board`.
    ///
    /// The side to move is `root` when `maximizing`, otherwise its opponent.
    /// A `depth` of zero or less evaluates `board` immediately.
    pub fn search(
        &mut self,
        board: &Board,
        depth: i32,
        maximizing: bool,
        root: Color,
        alpha: i32,
        beta: i32,
    ) -> SearchOutcome {
        self.deadline = None;
        self.timed_out = false;
        self.minimax(board, depth, maximizing, root, alpha, beta)
    }

    /// Picks a move for `color`.
    ///
    /// Without a timeout this is one `search` at `depth`. With a timeout the
    /// search deepens from 1 to `depth`; depth 1 always completes and the
    /// result of the deepest completed iteration wins.
    pub fn choose(&mut self, board: &Board, color: Color, depth: i32) -> SearchReport {
        let start = Instant::now();

        let report = match self.timeout {
            None => {
                let outcome = self.search(board, depth, true, color, MIN_SCORE, MAX_SCORE);
                SearchReport {
                    value: outcome.value,
                    board: outcome.board,
                    nodes: outcome.nodes,
                    depth,
                    timed_out: false,
                }
            }
            Some(timeout) => self.deepen(board, color, depth, start + timeout),
        };

        debug!(
            %color,
            depth = report.depth,
            value = report.value,
            nodes = report.nodes,
            pruning = self.pruning,
            timed_out = report.timed_out,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        report
    }

    fn deepen(&mut self, board: &Board, color: Color, max_depth: i32, deadline: Instant) -> SearchReport {
        let first_depth = max_depth.min(1);
        let first = self.search(board, first_depth, true, color, MIN_SCORE, MAX_SCORE);
        let mut report = SearchReport {
            value: first.value,
            board: first.board,
            nodes: first.nodes,
            depth: first_depth,
            timed_out: false,
        };

        self.deadline = Some(deadline);
        for depth in 2..=max_depth {
            let outcome = self.minimax(board, depth, true, color, MIN_SCORE, MAX_SCORE);
            report.nodes += outcome.nodes;
            if self.timed_out {
                trace!(depth, "iteration abandoned at deadline");
                report.timed_out = true;
                break;
            }
            trace!(depth, value = outcome.value, nodes = outcome.nodes, "iteration complete");
            report.value = outcome.value;
            report.board = outcome.board;
            report.depth = depth;
        }
        self.deadline = None;

        report
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: i32,
        maximizing: bool,
        root: Color,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchOutcome {
        let to_move = if maximizing { root } else { root.opponent() };
        let moves = if depth > 0 {
            board.legal_moves(to_move)
        } else {
            Vec::new()
        };

        if moves.is_empty() {
            return SearchOutcome {
                value: self.evaluator.evaluate(board, root),
                board: *board,
                nodes: 1,
            };
        }

        let mut best = SearchOutcome {
            value: if maximizing { MIN_SCORE } else { MAX_SCORE },
            board: *board,
            nodes: 1,
        };

        for successor in moves {
            if self.deadline_passed() {
                break;
            }

            let child = self.minimax(&successor.board, depth - 1, !maximizing, root, alpha, beta);
            best.nodes += child.nodes;

            let improves = if maximizing {
                child.value > best.value
            } else {
                child.value < best.value
            };
            if improves {
                best.value = child.value;
                best.board = successor.board;
            }

            if self.pruning {
                if maximizing {
                    alpha = alpha.max(best.value);
                } else {
                    beta = beta.min(best.value);
                }
                if beta <= alpha {
                    break;
                }
            }
        }

        best
    }

    fn deadline_passed(&mut self) -> bool {
        if !self.timed_out
            && let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.timed_out = true;
        }
        self.timed_out
    }
}
