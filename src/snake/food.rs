//! Food placement

use rand::Rng;

use super::game::Point;

/// The single piece of food on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Point,
}

impl Food {
    /// Place food uniformly at random in `[-range, range]²`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, range: i32) -> Self {
        let mut food = Self {
            position: Point::new(0, 0),
        };
        food.refresh(rng, range);
        food
    }

    pub fn at(position: Point) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the food to a new random point in `[-range, range]²`.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R, range: i32) {
        self.position = Point::new(
            rng.random_range(-range..=range),
            rng.random_range(-range..=range),
        );
    }
}
