//! Observer implementations for training sessions

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Observer, StepEvent},
    types::{Heading, State},
};

/// Progress bar observer - Shows session progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    episodes: usize,
    best_score: u32,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            episodes: 0,
            best_score: 0,
        }
    }

    fn message(&self) -> String {
        format!("episodes:{} best:{}", self.episodes, self.best_score)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_session_start(&mut self, max_ticks: usize) -> Result<()> {
        let pb = ProgressBar::new(max_ticks as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ticks ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_tick(&mut self, tick: usize, _state: &State, _heading: Heading) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(tick as u64 + 1);
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, score: u32) -> Result<()> {
        self.episodes += 1;
        self.best_score = self.best_score.max(score);
        if let Some(pb) = &self.progress_bar {
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks session metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    ticks: usize,
    /// Ticks up to the end of the last completed episode
    completed_ticks: usize,
    food_events: usize,
    wall_hits: usize,
    self_hits: usize,
    episode_scores: Vec<u32>,
    reward_sum: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean food eaten per completed episode
    pub fn mean_episode_score(&self) -> f64 {
        if self.episode_scores.is_empty() {
            0.0
        } else {
            self.episode_scores.iter().map(|&s| f64::from(s)).sum::<f64>()
                / self.episode_scores.len() as f64
        }
    }

    /// Mean number of ticks per completed episode
    ///
    /// Ticks of an episode still running at the end of the session are ignored.
    pub fn mean_episode_length(&self) -> f64 {
        if self.episode_scores.is_empty() {
            0.0
        } else {
            self.completed_ticks as f64 / self.episode_scores.len() as f64
        }
    }

    pub fn episode_scores(&self) -> &[u32] {
        &self.episode_scores
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            ticks: self.ticks,
            episodes: self.episode_scores.len(),
            food_events: self.food_events,
            wall_hits: self.wall_hits,
            self_hits: self.self_hits,
            total_reward: self.reward_sum,
            mean_episode_score: self.mean_episode_score(),
            mean_episode_length: self.mean_episode_length(),
            best_episode_score: self.episode_scores.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Summary of session metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub ticks: usize,
    pub episodes: usize,
    pub food_events: usize,
    pub wall_hits: usize,
    pub self_hits: usize,
    pub total_reward: f64,
    pub mean_episode_score: f64,
    pub mean_episode_length: f64,
    pub best_episode_score: u32,
}

impl Observer for MetricsObserver {
    fn on_tick(&mut self, _tick: usize, _state: &State, _heading: Heading) -> Result<()> {
        self.ticks += 1;
        Ok(())
    }

    fn on_update(
        &mut self,
        _tick: usize,
        event: StepEvent,
        reward: f64,
        _new_value: f64,
    ) -> Result<()> {
        self.reward_sum += reward;
        match event {
            StepEvent::AteFood => self.food_events += 1,
            StepEvent::HitWall => self.wall_hits += 1,
            StepEvent::HitSelf => self.self_hits += 1,
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, score: u32) -> Result<()> {
        self.episode_scores.push(score);
        self.completed_ticks = self.ticks;
        Ok(())
    }
}

/// Observer handle that stays readable after the session takes ownership
///
/// Clones share the inner observer; pass one clone to the session and keep
/// the other to read results afterwards.
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> Clone for SharedObserver<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: Observer> SharedObserver<O> {
    pub fn new(observer: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observer)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, O> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_session_start(&mut self, max_ticks: usize) -> Result<()> {
        self.lock().on_session_start(max_ticks)
    }

    fn on_tick(&mut self, tick: usize, state: &State, heading: Heading) -> Result<()> {
        self.lock().on_tick(tick, state, heading)
    }

    fn on_update(
        &mut self,
        tick: usize,
        event: StepEvent,
        reward: f64,
        new_value: f64,
    ) -> Result<()> {
        self.lock().on_update(tick, event, reward, new_value)
    }

    fn on_episode_end(&mut self, episode: usize, score: u32) -> Result<()> {
        self.lock().on_episode_end(episode, score)
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.lock().on_session_end()
    }
}
