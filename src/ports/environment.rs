//! Environment port - the game side of the agent/environment loop

use crate::types::{Heading, State};

/// Something that happened during a single environment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// The snake reached the food.
    AteFood,
    /// The head left the playing field.
    HitWall,
    /// The head ran into the snake's own body.
    HitSelf,
}

impl StepEvent {
    /// Whether the event ends the current episode.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepEvent::HitWall | StepEvent::HitSelf)
    }
}

/// Outcome of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Events in the order they were detected.
    pub events: Vec<StepEvent>,
    /// Observation after the step (after any reset).
    pub next_state: State,
    /// Episode score reached in this step, taken before any reset.
    pub score: u32,
}

impl Transition {
    pub fn is_terminal(&self) -> bool {
        self.events.iter().any(|event| event.is_terminal())
    }
}

/// Environment Adapter: produces discretized observations and applies the
/// agent's chosen heading.
///
/// Reward shaping is left to the caller so that different schedules can be
/// tried against the same environment.
pub trait Environment {
    /// Current discretized observation.
    fn current_state(&self) -> State;

    /// Apply a heading for one tick.
    fn step(&mut self, heading: Heading) -> Transition;

    /// Current episode score.
    fn score(&self) -> u32 {
        0
    }

    /// Best score seen so far.
    fn high_score(&self) -> u32 {
        0
    }
}
