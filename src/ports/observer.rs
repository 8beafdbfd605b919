//! Observer port - abstraction for training observation and data collection
//!
//! Observers receive session events without the session knowing about output
//! formats or metrics.

use crate::{
    Result,
    ports::environment::StepEvent,
    types::{Heading, State},
};

/// Observer trait for monitoring a training session
///
/// # Event Sequence
///
/// 1. `on_session_start(max_ticks)` - Once at the beginning
/// 2. For each tick:
///    - `on_tick(...)` - After the action was applied
///    - `on_update(...)` - For each value-table update caused by the tick
///    - `on_episode_end(...)` - When the tick ended an episode
/// 3. `on_session_end()` - Once at the end
pub trait Observer: Send {
    fn on_session_start(&mut self, _max_ticks: usize) -> Result<()> {
        Ok(())
    }

    /// Called for every tick with the observed state and chosen heading.
    fn on_tick(&mut self, _tick: usize, _state: &State, _heading: Heading) -> Result<()> {
        Ok(())
    }

    /// Called after the learner wrote a new value.
    fn on_update(
        &mut self,
        _tick: usize,
        _event: StepEvent,
        _reward: f64,
        _new_value: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a collision ends an episode.
    ///
    /// * `episode` - Index of the completed episode (0-based)
    /// * `score` - Food eaten during the episode
    fn on_episode_end(&mut self, _episode: usize, _score: u32) -> Result<()> {
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        Ok(())
    }
}
