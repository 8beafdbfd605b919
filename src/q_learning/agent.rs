//! Epsilon-greedy Q-learning agent with explicit persistence lifecycle
//!
//! The agent owns its value table for its whole lifetime. It loads a snapshot
//! once at construction and writes one on [`QLearningAgent::save`] or
//! [`QLearningAgent::close`]. Persistence problems are logged and absorbed;
//! they never reach the caller.

use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{error, info, trace, warn};

use crate::{
    app::AgentConfig,
    error::{Error, Result},
    ports::SnapshotRepository,
    q_learning::q_table::QTable,
    types::{Heading, State},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
pub struct QLearningAgent {
    q_table: QTable,
    config: AgentConfig,
    rng: StdRng,
    repository: Arc<dyn SnapshotRepository + Send + Sync>,
}

impl std::fmt::Debug for QLearningAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QLearningAgent")
            .field("config", &self.config)
            .field("table_size", &self.q_table.len())
            .finish_non_exhaustive()
    }
}

impl QLearningAgent {
    /// Create an agent and load any existing snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation.
    /// A missing or unreadable snapshot is not an error.
    pub fn new(
        config: AgentConfig,
        repository: Arc<dyn SnapshotRepository + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;

        let mut agent = Self {
            q_table: QTable::new(),
            rng: build_rng(config.seed),
            config,
            repository,
        };
        agent.load();
        Ok(agent)
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The ordered action set.
    pub fn actions(&self) -> &[Heading] {
        &self.config.actions
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Current estimate for a state-action pair (0.0 when never updated)
    pub fn value(&self, state: &State, action: Heading) -> f64 {
        self.q_table.get(state, action)
    }

    /// Heading for an index returned by [`QLearningAgent::choose_action`].
    pub fn action(&self, action_index: usize) -> Result<Heading> {
        self.config
            .actions
            .get(action_index)
            .copied()
            .ok_or(Error::ActionOutOfRange {
                index: action_index,
                count: self.config.actions.len(),
            })
    }

    /// ε-greedy action selection
    ///
    /// With probability ε returns a uniformly random index into the action
    /// set; otherwise the index of the first action with the highest value.
    /// No random number is drawn when ε is zero.
    pub fn choose_action(&mut self, state: &State) -> usize {
        let actions = &self.config.actions;
        if self.config.epsilon > 0.0 && self.rng.random::<f64>() < self.config.epsilon {
            // Explore
            self.rng.random_range(0..actions.len())
        } else {
            // Exploit
            self.q_table.greedy_index(state, actions)
        }
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the value written for `(state, actions[action_index])`.
    pub fn update(
        &mut self,
        state: &State,
        action_index: usize,
        reward: f64,
        next_state: &State,
    ) -> Result<f64> {
        let next_max = self.q_table.max_value(next_state, &self.config.actions);
        self.apply_update(state, action_index, reward, next_max)
    }

    /// Q-learning update toward an absorbing terminal state (max_a' Q(s',a') = 0).
    pub fn update_terminal(
        &mut self,
        state: &State,
        action_index: usize,
        reward: f64,
    ) -> Result<f64> {
        self.apply_update(state, action_index, reward, 0.0)
    }

    fn apply_update(
        &mut self,
        state: &State,
        action_index: usize,
        reward: f64,
        next_max: f64,
    ) -> Result<f64> {
        let action = self.action(action_index)?;
        let current = self.q_table.get(state, action);
        let td_target = reward + self.config.discount_factor * next_max;
        let new_value = current + self.config.learning_rate * (td_target - current);
        self.q_table.set(*state, action, new_value);

        trace!(%state, %action, reward, current, new_value, "Q-value updated");
        Ok(new_value)
    }

    /// Replace the table with the stored snapshot.
    ///
    /// A missing snapshot leaves an empty table and logs a notice; a corrupt
    /// or unreadable one leaves an empty table and logs a warning. Returns the
    /// number of entries loaded.
    pub fn load(&mut self) -> usize {
        let path = self.config.snapshot_path.as_path();
        self.q_table.clear();

        if !self.repository.exists(path) {
            info!(path = %path.display(), "No existing Q-table found, starting from scratch");
            return 0;
        }

        match self.repository.load(path) {
            Ok(snapshot) => {
                self.q_table = QTable::from_snapshot(snapshot);
                info!(
                    path = %path.display(),
                    entries = self.q_table.len(),
                    "Q-table loaded"
                );
                self.q_table.len()
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load Q-table, starting with an empty one"
                );
                0
            }
        }
    }

    /// Write the full table to the snapshot location, replacing prior content.
    ///
    /// Safe to call any number of times. A failure is logged and the in-memory
    /// table stays authoritative. Returns whether the write succeeded.
    pub fn save(&self) -> bool {
        let path = self.config.snapshot_path.as_path();
        match self.repository.save(&self.q_table.to_snapshot(), path) {
            Ok(()) => {
                info!(path = %path.display(), entries = self.q_table.len(), "Q-table saved");
                true
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to save Q-table");
                false
            }
        }
    }

    /// Save one last time and release the agent.
    pub fn close(self) -> bool {
        self.save()
    }
}
