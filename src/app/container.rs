//! Dependency injection container for the snake-q application.
//!
//! The container owns infrastructure dependencies (snapshot storage) and
//! provides factory methods for creating agents.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::repository_for,
    ports::SnapshotRepository,
    q_learning::{QLearningAgent, QTable, SnapshotFormat},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use snake_q::app::{App, AgentConfig};
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::default().with_seed(42))?;
/// agent.close();
/// # Ok::<(), snake_q::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use snake_q::app::App;
/// use snake_q::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository override; `None` picks a file repository per config format
    snapshot_repository: Option<Arc<dyn SnapshotRepository + Send + Sync>>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Snapshots go to the file system in the format each agent config asks
    /// for; no default seed.
    pub fn new() -> Self {
        Self {
            snapshot_repository: None,
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Repository used for the given snapshot format.
    pub fn snapshot_repository(
        &self,
        format: SnapshotFormat,
    ) -> Arc<dyn SnapshotRepository + Send + Sync> {
        match &self.snapshot_repository {
            Some(repository) => Arc::clone(repository),
            None => repository_for(format),
        }
    }

    /// Create a Q-learning agent, loading its snapshot if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn create_agent(&self, mut config: AgentConfig) -> Result<QLearningAgent> {
        // Apply seed from config or use container default
        config.seed = config.seed.or(self.default_seed);
        let repository = self.snapshot_repository(config.snapshot_format());
        QLearningAgent::new(config, repository)
    }

    /// Read a snapshot without creating an agent.
    ///
    /// Unlike agent construction, any failure is returned to the caller.
    pub fn read_table(&self, path: &Path, format: SnapshotFormat) -> Result<QTable> {
        let snapshot = self.snapshot_repository(format).load(path)?;
        Ok(QTable::from_snapshot(snapshot))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject in-memory repositories and control randomness.
pub struct AppBuilder {
    snapshot_repository: Option<Arc<dyn SnapshotRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            snapshot_repository: None,
            default_seed: None,
        }
    }

    /// Use `repo` for every agent, whatever format its config names.
    pub fn with_repository<R: SnapshotRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.snapshot_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    pub fn build(self) -> App {
        App {
            snapshot_repository: self.snapshot_repository,
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
