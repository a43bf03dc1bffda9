use std::io::{BufRead, Write};

use crate::command::Command;
use crate::error::{ConsoleError, GameError};
use crate::game::{Game, Turn};
use crate::types::GameResult;

const SETTINGS_HELP: &str = "Enter 1 to toggle debug mode, 2 to toggle AI, 3 to toggle pruning, 4 N to set the search depth.";

/// Text front end driving a [`Game`] over any line-oriented input.
///
/// Machine turns wait for an empty line so settings can be changed first; when
/// input runs out they proceed on their own.
pub struct Console<R, W> {
    game: Game,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until neither side can move and returns the final counts.
    pub fn run(&mut self) -> Result<GameResult, ConsoleError> {
        loop {
            write!(self.output, "\n{}", self.game.board())?;
            match self.game.turn() {
                Turn::GameOver(result) => {
                    self.report_result(result)?;
                    return Ok(result);
                }
                Turn::Pass => self.forced_pass()?,
                Turn::Moves(moves) => {
                    if self.game.config().debug {
                        let listed: Vec<String> =
                            moves.iter().map(|s| s.mv.position().to_string()).collect();
                        writeln!(self.output, "Possible moves: {}", listed.join(" "))?;
                    }
                    self.take_turn()?;
                }
            }
        }
    }

    fn take_turn(&mut self) -> Result<(), ConsoleError> {
        let color = self.game.current();
        loop {
            let machine = self.game.config().is_machine(color);
            if machine {
                write!(
                    self.output,
                    "Press enter to let the CPU move. {SETTINGS_HELP}\n{color} AI: "
                )?;
            } else {
                write!(
                    self.output,
                    "Enter a tile such as 2E to make a move. {SETTINGS_HELP}\n{color}: "
                )?;
            }
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None if machine => String::new(),
                None => return Err(ConsoleError::InputClosed),
            };
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            if self.apply_setting(command)? {
                continue;
            }

            match command {
                Command::Continue if machine => {
                    let (mv, report) = self.game.play_machine()?;
                    writeln!(self.output, "{mv}")?;
                    if self.game.config().debug {
                        writeln!(
                            self.output,
                            "Search: value {}, depth {}, {} nodes{}",
                            report.value,
                            report.depth,
                            report.nodes,
                            if report.timed_out { ", timed out" } else { "" }
                        )?;
                    }
                    return Ok(());
                }
                Command::Play(_) if machine => {
                    writeln!(self.output, "{color} is CPU-controlled; press enter.")?;
                }
                Command::Play(position) => match self.game.play(position) {
                    Ok(mv) => {
                        writeln!(self.output, "{mv}")?;
                        return Ok(());
                    }
                    Err(GameError::IllegalMove(_)) => writeln!(self.output, "Invalid move!")?,
                    Err(err) => return Err(err.into()),
                },
                _ => writeln!(self.output, "Enter a move such as 2E.")?,
            }
        }
    }

    fn forced_pass(&mut self) -> Result<(), ConsoleError> {
        let color = self.game.current();
        loop {
            write!(
                self.output,
                "No moves possible. Press enter to forfeit turn. {SETTINGS_HELP}\n{color}: "
            )?;
            self.output.flush()?;

            let line = self.read_line()?.unwrap_or_default();
            let command = Command::parse(&line).unwrap_or(Command::Continue);
            if self.apply_setting(command)? {
                continue;
            }

            self.game.pass()?;
            writeln!(self.output, "{color} passes.")?;
            return Ok(());
        }
    }

    /// Handles the settings commands; returns `false` for anything else.
    fn apply_setting(&mut self, command: Command) -> Result<bool, ConsoleError> {
        let color = self.game.current();
        let config = self.game.config_mut();
        match command {
            Command::ToggleDebug => {
                config.debug = !config.debug;
                writeln!(self.output, "Debug mode: {}", config.debug)?;
            }
            Command::ToggleMachine => {
                let now = config.toggle_machine(color);
                writeln!(self.output, "AI: {now}")?;
            }
            Command::TogglePruning => {
                config.pruning = !config.pruning;
                writeln!(self.output, "Alpha-beta pruning: {}", config.pruning)?;
            }
            Command::SetDepth(depth) => {
                config.depth = depth;
                writeln!(self.output, "Search depth: {depth}")?;
            }
            Command::Continue | Command::Play(_) => return Ok(false),
        }
        Ok(true)
    }

    fn report_result(&mut self, result: GameResult) -> Result<(), ConsoleError> {
        writeln!(self.output, "\nGame has ended:")?;
        writeln!(
            self.output,
            "BLACK: {}  WHITE: {}",
            result.black_count, result.white_count
        )?;
        match result.winner {
            Some(color) => writeln!(self.output, "{color} wins.")?,
            None => writeln!(self.output, "Draw.")?,
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
