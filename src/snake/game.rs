//! Snake body, movement and collision rules
//!
//! A tick reports at most one collision. A wall hit takes precedence over a
//! self-collision, and a head overlapping several body segments (such as a
//! tail stacked by growth) still counts as a single `HitSelf`.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{food::Food, scoreboard::Scoreboard};
use crate::{
    ports::{Environment, StepEvent, Transition},
    types::{Heading, State},
};

/// A point on the playing field (origin at the centre, y grows upwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Move `distance` units in `heading`
    pub fn moved(&self, heading: Heading, distance: i32) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// The head may reach ±`half_extent` on either axis; beyond is a wall hit
    pub half_extent: i32,
    /// Distance each segment moves per tick (also the segment spacing)
    pub move_distance: i32,
    /// Food is eaten when the head is closer than this
    pub food_radius: f64,
    /// Head closer than this to a body segment is a self-collision
    pub body_radius: f64,
    /// Seed for food placement
    pub seed: Option<u64>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            half_extent: 280,
            move_distance: 20,
            food_radius: 15.0,
            body_radius: 10.0,
            seed: None,
        }
    }
}

impl SnakeConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Point>,
    heading: Heading,
}

impl Snake {
    /// Three segments in a row ending at the origin, heading right
    pub fn new(spacing: i32) -> Self {
        let segments = (0..3).map(|i| Point::new(-i * spacing, 0)).collect();
        Self {
            segments,
            heading: Heading::Right,
        }
    }

    pub fn head(&self) -> Point {
        self.segments[0]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn segments(&self) -> &[Point] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Point the head in a new direction. Reversal onto the body is allowed.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Every segment takes the place of the one ahead; the head moves forward.
    pub fn advance(&mut self, distance: i32) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = self.segments[0].moved(self.heading, distance);
    }

    /// Grow by one segment stacked on the tail.
    pub fn extend(&mut self) {
        if let Some(&tail) = self.segments.last() {
            self.segments.push(tail);
        }
    }

    /// Whether the head is within `radius` of any body segment
    pub fn head_hits_body(&self, radius: f64) -> bool {
        let head = self.head();
        self.segments[1..]
            .iter()
            .any(|segment| head.distance(*segment) < radius)
    }
}

/// A running game
pub struct SnakeGame {
    config: SnakeConfig,
    snake: Snake,
    food: Food,
    scoreboard: Scoreboard,
    rng: StdRng,
    episodes: usize,
}

impl SnakeGame {
    /// Create a new game with the given configuration
    pub fn new(config: SnakeConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let food = Food::spawn(&mut rng, config.half_extent);
        Self {
            snake: Snake::new(config.move_distance),
            food,
            scoreboard: Scoreboard::new(),
            rng,
            episodes: 0,
            config,
        }
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Number of completed episodes (collisions so far)
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Put the food at a fixed point.
    pub fn place_food(&mut self, position: Point) {
        self.food = Food::at(position);
    }

    fn out_of_bounds(&self, point: Point) -> bool {
        let limit = self.config.half_extent;
        point.x > limit || point.x < -limit || point.y > limit || point.y < -limit
    }

    fn end_episode(&mut self, event: StepEvent) -> u32 {
        let score = self.scoreboard.reset();
        self.snake = Snake::new(self.config.move_distance);
        self.episodes += 1;
        debug!(episode = self.episodes, score, ?event, "Episode ended");
        score
    }
}

impl Environment for SnakeGame {
    fn current_state(&self) -> State {
        let head = self.snake.head();
        State::new(head.x, head.y)
    }

    fn step(&mut self, heading: Heading) -> Transition {
        self.snake.set_heading(heading);
        self.snake.advance(self.config.move_distance);

        let mut events = Vec::new();
        let mut score = self.scoreboard.score();

        if self.snake.head().distance(self.food.position()) < self.config.food_radius {
            self.food.refresh(&mut self.rng, self.config.half_extent);
            self.snake.extend();
            self.scoreboard.increase_score();
            score = self.scoreboard.score();
            events.push(StepEvent::AteFood);
        }

        if self.out_of_bounds(self.snake.head()) {
            score = self.end_episode(StepEvent::HitWall);
            events.push(StepEvent::HitWall);
        } else if self.snake.head_hits_body(self.config.body_radius) {
            score = self.end_episode(StepEvent::HitSelf);
            events.push(StepEvent::HitSelf);
        }

        Transition {
            events,
            next_state: self.current_state(),
            score,
        }
    }

    fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }
}
