use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::{CellSize, Color, Position};
use crate::config::ArenaBounds;
use crate::snake::Body;

/// Food item currently placed in the arena.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub size: CellSize,
    pub color: Color,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, size: CellSize, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }

    /// Returns true if the body's head is on this food.
    #[must_use]
    pub fn is_eaten_by(&self, body: &Body) -> bool {
        body.check_collision_with_fruit(self.position, self.size)
    }

    /// Spawns food of `size` in a free grid cell, or `None` when the arena is full.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: ArenaBounds,
        size: CellSize,
        color: Color,
        body: &Body,
    ) -> Option<Self> {
        spawn_position(rng, bounds, size, body).map(|position| Self::new(position, size, color))
    }
}

/// Returns every grid-aligned position a `size` cell can occupy in `bounds`.
///
/// Positions step from `top_left` in whole cells and obey the same span rule
/// as [`Body::inside_bounds`], so a head placed on any of them is in bounds.
/// The caller keeps the arena within [`MAX_GRID_CELLS`](crate::config::MAX_GRID_CELLS)
/// through [`GameConfig::validate`](crate::config::GameConfig::validate).
#[must_use]
pub fn grid_positions(bounds: ArenaBounds, size: CellSize) -> Vec<Position> {
    let (max_x, max_y) = bounds.max_corner(size);
    let xs = axis_positions(bounds.top_left.x, max_x, size.width());
    let ys = axis_positions(bounds.top_left.y, max_y, size.height());

    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| Position { x, y }))
        .collect()
}

fn axis_positions(start: i32, max: i64, step: i32) -> Vec<i32> {
    (i64::from(start)..=max)
        .step_by(step.unsigned_abs() as usize)
        .filter_map(|value| i32::try_from(value).ok())
        .collect()
}

/// Picks a free grid position no cell of `body` is on.
///
/// Candidates are filtered with [`Body::check_collision`] so a proposal that
/// would land on the snake is never returned.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: ArenaBounds,
    size: CellSize,
    body: &Body,
) -> Option<Position> {
    let candidates: Vec<Position> = grid_positions(bounds, size)
        .into_iter()
        .filter(|position| !body.check_collision(*position, size))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
