use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;

/// Errors raised while building cell geometry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GeometryError {
    #[error("cell size must be positive on both axes, got {width}x{height}")]
    NonPositiveSize { width: i32, height: i32 },
    #[error("a snake body needs at least one cell")]
    EmptyBody,
}

/// Top-left corner of a cell in arena coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one cell step away along `direction`.
    ///
    /// Saturates at the `i32` limits rather than wrapping, so a head pushed
    /// past the edge of the coordinate space stays pinned there and fails
    /// any bounds check that excludes it.
    #[must_use]
    pub fn offset(self, direction: Direction, size: CellSize) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y.saturating_sub(size.height),
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y.saturating_add(size.height),
            },
            Direction::Left => Self {
                x: self.x.saturating_sub(size.width),
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x.saturating_add(size.width),
                y: self.y,
            },
        }
    }
}

/// Width and height of one cell. Always positive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCellSize", into = "RawCellSize")]
pub struct CellSize {
    width: i32,
    height: i32,
}

impl CellSize {
    /// Validates and builds a cell size.
    ///
    /// Zero or negative sides are rejected here so that movement never has to
    /// deal with degenerate steps.
    pub fn new(width: i32, height: i32) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::NonPositiveSize { width, height });
        }

        Ok(Self { width, height })
    }

    /// Square cell with side `side`.
    pub fn square(side: i32) -> Result<Self, GeometryError> {
        Self::new(side, side)
    }

    #[must_use]
    pub fn width(self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> i32 {
        self.height
    }
}

#[derive(Serialize, Deserialize)]
struct RawCellSize {
    width: i32,
    height: i32,
}

impl TryFrom<RawCellSize> for CellSize {
    type Error = GeometryError;

    fn try_from(raw: RawCellSize) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl From<CellSize> for RawCellSize {
    fn from(size: CellSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

/// RGB display colour. Not consulted by any game logic.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One block of the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    size: CellSize,
    color: Color,
}

impl Cell {
    #[must_use]
    pub fn new(position: Position, size: CellSize, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    #[must_use]
    pub fn size(&self) -> CellSize {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}
