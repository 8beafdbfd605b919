//! Headless Snake environment
//!
//! Game rules without any rendering: a snake of square segments moving a
//! fixed distance per tick inside a square field centred on the origin,
//! food placed at random integer points, and collisions with the walls or
//! the snake's own body.

pub mod food;
pub mod game;
pub mod scoreboard;

pub use food::Food;
pub use game::{Point, Snake, SnakeConfig, SnakeGame};
pub use scoreboard::Scoreboard;
