use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::cell::{Cell, Position};
use crate::config::{ArenaBounds, ConfigError, GameConfig};
use crate::food::Food;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::Body;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver(DeathReason),
    Victory,
}

impl GameStatus {
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::GameOver(_) | Self::Victory)
    }
}

/// What a single [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session is not running; nothing moved.
    Idle,
    Moved,
    Ate,
    Died(DeathReason),
    Won,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub body: Body,
    pub food: Food,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    direction: Direction,
    buffered_direction: Direction,
    capacity: usize,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a session from `config`, seeding food placement with `config.seed`.
    ///
    /// The config is validated first, so the arena is never empty or larger
    /// than [`MAX_GRID_CELLS`](crate::config::MAX_GRID_CELLS).
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let body = Body::new(config.start_position(), config.cell_size, config.snake_color);
        let capacity =
            usize::try_from(config.bounds.grid_cell_count(config.cell_size)).unwrap_or(usize::MAX);

        // A one-cell arena leaves nowhere to put food.
        let (food, status) = match Food::spawn(
            &mut rng,
            config.bounds,
            config.cell_size,
            config.food_color,
            &body,
        ) {
            Some(food) => (food, GameStatus::Playing),
            None => (
                Food::new(body.head_position(), config.cell_size, config.food_color),
                GameStatus::Victory,
            ),
        };

        Ok(Self {
            body,
            food,
            score: 0,
            tick_count: 0,
            status,
            direction: Direction::Right,
            buffered_direction: Direction::Right,
            capacity,
            config,
            rng,
        })
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        self.direction = self.buffered_direction;
        self.body.step(self.direction);

        let bounds = self.bounds();
        if !self.body.inside_bounds(bounds.top_left, bounds.bottom_right) {
            return self.finish(DeathReason::Wall);
        }

        if self.body.check_collision_with_self() {
            return self.finish(DeathReason::SelfCollision);
        }

        if !self.food.is_eaten_by(&self.body) {
            return TickOutcome::Moved;
        }

        self.body.grow();
        self.score += 1;
        debug!(score = self.score, length = self.body.len(), at = ?self.food.position, "food eaten");

        if self.body.len() >= self.capacity {
            return self.win();
        }

        match Food::spawn(
            &mut self.rng,
            bounds,
            self.config.cell_size,
            self.config.food_color,
            &self.body,
        ) {
            Some(food) => {
                debug!(at = ?food.position, "food respawned");
                self.food = food;
                TickOutcome::Ate
            }
            None => self.win(),
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.buffer_direction(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Playing => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Playing,
                    other => other,
                };
            }
        }
    }

    /// Queues the direction used by the next tick.
    ///
    /// A one-cell body may reverse freely; longer bodies reject turning back
    /// into their own neck.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if self.body.len() > 1 && !direction_change_is_valid(self.direction, direction) {
            return;
        }
        self.buffered_direction = direction;
    }

    /// Overrides the current heading, e.g. when restoring a scripted body.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.buffered_direction = direction;
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn bounds(&self) -> ArenaBounds {
        self.config.bounds
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Captures a serialisable view of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            score: self.score,
            ticks: self.tick_count,
            direction: self.direction,
            head: self.body.head_position(),
            cells: self.body.cells().copied().collect(),
            food: self.food,
        }
    }

    fn win(&mut self) -> TickOutcome {
        self.status = GameStatus::Victory;
        info!(score = self.score, ticks = self.tick_count, "arena filled");
        TickOutcome::Won
    }

    fn finish(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver(reason);
        info!(
            ?reason,
            score = self.score,
            ticks = self.tick_count,
            head = ?self.body.head_position(),
            "game over"
        );
        TickOutcome::Died(reason)
    }
}

/// Point-in-time view of a session, head first.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub score: u32,
    pub ticks: u64,
    pub direction: Direction,
    pub head: Position,
    pub cells: Vec<Cell>,
    pub food: Food,
}
