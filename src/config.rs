use std::time::Duration;

use crate::ai::DEFAULT_CORNER_MULTIPLIER;
use crate::types::Color;

pub const DEFAULT_DEPTH: i32 = 6;

/// Runtime settings threaded through the turn controller into the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Print legal moves and search reports to the player.
    pub debug: bool,
    pub black_machine: bool,
    pub white_machine: bool,
    pub pruning: bool,
    /// Search depth in plies; zero or less means a one-look evaluation.
    pub depth: i32,
    pub corner_multiplier: i32,
    /// Enables iterative deepening bounded by this budget.
    pub time_limit: Option<Duration>,
}

impl GameConfig {
    pub fn is_machine(&self, color: Color) -> bool {
        match color {
            Color::Black => self.black_machine,
            Color::White => self.white_machine,
        }
    }

    /// Flips machine control for `color` and returns the new setting.
    pub fn toggle_machine(&mut self, color: Color) -> bool {
        let flag = match color {
            Color::Black => &mut self.black_machine,
            Color::White => &mut self.white_machine,
        };
        *flag = !*flag;
        *flag
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            debug: false,
            black_machine: false,
            white_machine: false,
            pruning: true,
            depth: DEFAULT_DEPTH,
            corner_multiplier: DEFAULT_CORNER_MULTIPLIER,
            time_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_two_humans_with_pruned_depth_six() {
        let config = GameConfig::default();

        assert!(!config.is_machine(Color::Black));
        assert!(!config.is_machine(Color::White));
        assert!(config.pruning);
        assert_eq!(config.depth, 6);
        assert_eq!(config.corner_multiplier, 4);
        assert_eq!(config.time_limit, None);
    }

    #[test]
    fn machine_toggle_is_per_color() {
        let mut config = GameConfig::default();

        assert!(config.toggle_machine(Color::White));
        assert!(config.is_machine(Color::White));
        assert!(!config.is_machine(Color::Black));
        assert!(!config.toggle_machine(Color::White));
    }
}
