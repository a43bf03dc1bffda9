use crate::error::CommandError;
use crate::types::Position;

/// One line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Empty line: let the machine move, or forfeit a forced pass.
    Continue,
    ToggleDebug,
    /// Toggle machine control for the color to move.
    ToggleMachine,
    TogglePruning,
    SetDepth(i32),
    Play(Position),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Continue);
        };

        match head.to_ascii_lowercase().as_str() {
            "1" | "debug" => Ok(Self::ToggleDebug),
            "2" | "ai" => Ok(Self::ToggleMachine),
            "3" | "prune" => Ok(Self::TogglePruning),
            "4" | "depth" => {
                let value = words.next().unwrap_or_default();
                value
                    .parse()
                    .map(Self::SetDepth)
                    .map_err(|_| CommandError::InvalidDepth(value.to_string()))
            }
            _ => line
                .parse()
                .map(Self::Play)
                .map_err(|_| CommandError::Unrecognized(line.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_commands_have_numeric_and_word_forms() {
        assert_eq!(Command::parse(""), Ok(Command::Continue));
        assert_eq!(Command::parse("  \n"), Ok(Command::Continue));
        assert_eq!(Command::parse("1"), Ok(Command::ToggleDebug));
        assert_eq!(Command::parse("debug"), Ok(Command::ToggleDebug));
        assert_eq!(Command::parse("2"), Ok(Command::ToggleMachine));
        assert_eq!(Command::parse("AI"), Ok(Command::ToggleMachine));
        assert_eq!(Command::parse("3"), Ok(Command::TogglePruning));
        assert_eq!(Command::parse("depth 4"), Ok(Command::SetDepth(4)));
        assert_eq!(Command::parse("4 -2"), Ok(Command::SetDepth(-2)));
    }

    #[test]
    fn malformed_depth_is_a_recoverable_error() {
        assert_eq!(
            Command::parse("depth six"),
            Err(CommandError::InvalidDepth("six".to_string()))
        );
        assert_eq!(
            Command::parse("depth"),
            Err(CommandError::InvalidDepth(String::new()))
        );
    }

    #[test]
    fn anything_else_must_be_a_move() {
        assert_eq!(
            Command::parse("2E"),
            Ok(Command::Play(Position { row: 2, col: 4 }))
        );
        assert_eq!(
            Command::parse("e2"),
            Ok(Command::Play(Position { row: 2, col: 4 }))
        );
        assert_eq!(
            Command::parse("hello"),
            Err(CommandError::Unrecognized("hello".to_string()))
        );
    }
}
