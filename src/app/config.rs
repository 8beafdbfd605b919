//! Configuration types for agent creation.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::SnapshotFormat,
    types::Heading,
};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "q_table.msgpack";

/// Configuration for creating a Q-learning agent.
///
/// Fixed for the agent's lifetime. Built with a builder-style API or read
/// from a JSON file; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use snake_q::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.2)
///     .with_epsilon(0.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Exploration rate ε, in [0, 1]
    pub epsilon: f64,
    /// Where the value table is loaded from and saved to
    pub snapshot_path: PathBuf,
    /// Snapshot encoding; inferred from `snapshot_path` when unset
    pub format: Option<SnapshotFormat>,
    /// Ordered action set; indices into this list are what the policy returns
    pub actions: Vec<Heading>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 0.1,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            format: None,
            actions: Heading::ALL.to_vec(),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Read a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {path:?}"),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_snapshot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot_path = path.into();
        self
    }

    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_actions<I: IntoIterator<Item = Heading>>(mut self, actions: I) -> Self {
        self.actions = actions.into_iter().collect();
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective snapshot encoding.
    pub fn snapshot_format(&self) -> SnapshotFormat {
        self.format
            .unwrap_or_else(|| SnapshotFormat::from_path(&self.snapshot_path))
    }

    /// Check every parameter range and the action set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when:
    /// - the action set is empty or lists a heading twice
    /// - `learning_rate` is outside (0, 1]
    /// - `discount_factor` or `epsilon` is outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(invalid("action set must not be empty"));
        }
        for (i, action) in self.actions.iter().enumerate() {
            if self.actions[..i].contains(action) {
                return Err(invalid(format!("action '{action}' is listed more than once")));
            }
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid(format!(
                "learning rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid(format!(
                "discount factor must be in [0, 1], got {}",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfiguration {
        message: message.into(),
    }
}
