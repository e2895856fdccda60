use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cell::{CellSize, Color, GeometryError, Position};

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default arena width in pixels.
pub const DEFAULT_ARENA_WIDTH: i32 = 600;

/// Default arena height in pixels.
pub const DEFAULT_ARENA_HEIGHT: i32 = 400;

/// Default side of one snake/food cell in pixels.
pub const DEFAULT_CELL_SIDE: i32 = 20;

/// Default snake colour.
pub const DEFAULT_SNAKE_COLOR: Color = Color::rgb(0, 200, 0);

/// Default food colour.
pub const DEFAULT_FOOD_COLOR: Color = Color::rgb(220, 30, 30);

/// Default RNG seed for food placement.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Largest number of grid cells an arena may hold.
///
/// Food placement enumerates every cell, so this bounds the work per spawn.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Errors from loading a game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("arena {top_left:?}..{bottom_right:?} cannot hold a {width}x{height} cell")]
    EmptyArena {
        top_left: Position,
        bottom_right: Position,
        width: i32,
        height: i32,
    },
    #[error("arena holds {cells} grid cells, more than the limit of {limit}")]
    ArenaTooLarge { cells: u64, limit: u64 },
    #[error("start {start:?} is not a grid cell inside the arena")]
    MisalignedStart { start: Position },
}

/// Rectangular arena the head must stay within.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub top_left: Position,
    pub bottom_right: Position,
}

impl ArenaBounds {
    /// Arena anchored at the origin.
    #[must_use]
    pub const fn from_origin(width: i32, height: i32) -> Self {
        Self {
            top_left: Position::new(0, 0),
            bottom_right: Position::new(width, height),
        }
    }

    /// Width of the arena.
    #[must_use]
    pub fn span_x(self) -> i64 {
        i64::from(self.bottom_right.x) - i64::from(self.top_left.x)
    }

    /// Height of the arena.
    #[must_use]
    pub fn span_y(self) -> i64 {
        i64::from(self.bottom_right.y) - i64::from(self.top_left.y)
    }

    /// Largest grid-aligned top-left corner a `size` cell may take, on each axis.
    ///
    /// Follows the head bounds rule: the corner stays within `bottom_right`
    /// and corner plus size stays within the span.
    #[must_use]
    pub fn max_corner(self, size: CellSize) -> (i64, i64) {
        let (width, height) = (i64::from(size.width()), i64::from(size.height()));
        let max_x = (self.span_x() - width).min(i64::from(self.bottom_right.x));
        let max_y = (self.span_y() - height).min(i64::from(self.bottom_right.y));
        (max_x, max_y)
    }

    /// Number of grid columns and rows a `size` cell can occupy.
    #[must_use]
    pub fn grid_dimensions(self, size: CellSize) -> (u64, u64) {
        let (max_x, max_y) = self.max_corner(size);
        let columns = axis_steps(i64::from(self.top_left.x), max_x, size.width());
        let rows = axis_steps(i64::from(self.top_left.y), max_y, size.height());
        (columns, rows)
    }

    /// Total number of grid cells, saturating at `u64::MAX`.
    #[must_use]
    pub fn grid_cell_count(self, size: CellSize) -> u64 {
        let (columns, rows) = self.grid_dimensions(size);
        columns.saturating_mul(rows)
    }

    /// Returns true if a `size` cell at `position` sits on the arena grid.
    #[must_use]
    pub fn is_grid_cell(self, position: Position, size: CellSize) -> bool {
        let (max_x, max_y) = self.max_corner(size);
        let dx = i64::from(position.x) - i64::from(self.top_left.x);
        let dy = i64::from(position.y) - i64::from(self.top_left.y);

        dx >= 0
            && dy >= 0
            && i64::from(position.x) <= max_x
            && i64::from(position.y) <= max_y
            && dx % i64::from(size.width()) == 0
            && dy % i64::from(size.height()) == 0
    }
}

fn axis_steps(start: i64, max: i64, step: i32) -> u64 {
    if max < start {
        return 0;
    }
    u64::try_from((max - start) / i64::from(step) + 1).unwrap_or(0)
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::from_origin(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

/// Full setup for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub bounds: ArenaBounds,
    pub cell_size: CellSize,
    /// Head start position; `None` centres the head on the grid.
    pub start: Option<Position>,
    pub snake_color: Color,
    pub food_color: Color,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: ArenaBounds::default(),
            cell_size: default_cell_size(),
            start: None,
            snake_color: DEFAULT_SNAKE_COLOR,
            food_color: DEFAULT_FOOD_COLOR,
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Checks that the arena holds at least one cell and no more than
    /// [`MAX_GRID_CELLS`], and that an explicit start is a grid cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cells = self.bounds.grid_cell_count(self.cell_size);

        if cells == 0 {
            return Err(ConfigError::EmptyArena {
                top_left: self.bounds.top_left,
                bottom_right: self.bounds.bottom_right,
                width: self.cell_size.width(),
                height: self.cell_size.height(),
            });
        }

        if cells > MAX_GRID_CELLS {
            return Err(ConfigError::ArenaTooLarge {
                cells,
                limit: MAX_GRID_CELLS,
            });
        }

        if let Some(start) = self.start {
            if !self.bounds.is_grid_cell(start, self.cell_size) {
                return Err(ConfigError::MisalignedStart { start });
            }
        }

        Ok(())
    }

    /// Returns the configured start, or the grid cell nearest the arena centre.
    #[must_use]
    pub fn start_position(&self) -> Position {
        if let Some(start) = self.start {
            return start;
        }

        let (columns, rows) = self.bounds.grid_dimensions(self.cell_size);
        let top_left = self.bounds.top_left;
        Position {
            x: centre_on_axis(top_left.x, columns, self.cell_size.width()),
            y: centre_on_axis(top_left.y, rows, self.cell_size.height()),
        }
    }
}

fn centre_on_axis(start: i32, steps: u64, step: i32) -> i32 {
    let offset = i64::try_from(steps / 2).unwrap_or(0) * i64::from(step);
    i32::try_from(i64::from(start) + offset).unwrap_or(start)
}

fn default_cell_size() -> CellSize {
    match CellSize::square(DEFAULT_CELL_SIDE) {
        Ok(size) => size,
        Err(_) => unreachable!("DEFAULT_CELL_SIDE is positive"),
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads the game config from the default location.
///
/// Returns defaults when the file does not exist yet.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    load_config_from_path(&config_path())
}

/// Loads the game config from `path`.
///
/// Returns defaults when the file does not exist, and `Err` when it exists
/// but cannot be read, parsed or validated.
pub fn load_config_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = serde_json::from_str::<GameConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
