use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical movement directions for the snake head.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn from_command(command: char) -> Option<Self> {
        match command.to_ascii_uppercase() {
            'U' | 'W' => Some(Self::Up),
            'D' | 'S' => Some(Self::Down),
            'L' | 'A' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Errors from decoding directional commands.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum InputError {
    #[error("unknown move command {found:?} at position {index}")]
    UnknownCommand { index: usize, found: char },
}

/// High-level commands consumed by the tick driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Decodes a move script such as `"RRDDL"` into one direction per tick.
///
/// Accepts `U/D/L/R` and `W/A/S` letters in either case. Whitespace and commas
/// are skipped so scripts can be grouped for readability.
pub fn parse_moves(script: &str) -> Result<Vec<Direction>, InputError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, command)| !command.is_whitespace() && *command != ',')
        .map(|(index, command)| {
            Direction::from_command(command).ok_or(InputError::UnknownCommand {
                index,
                found: command,
            })
        })
        .collect()
}
