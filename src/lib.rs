//! Grid-based Snake core: a segmented body that advances one cell per tick,
//! with bounds, food and self-collision checks, plus a headless tick driver.

pub mod cell;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod snake;
