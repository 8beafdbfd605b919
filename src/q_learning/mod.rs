//! Tabular Q-learning
//!
//! The agent keeps one value per (state, action) pair and improves it with
//! the temporal difference rule
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! after every environment transition. Actions are picked ε-greedily.
//!
//! ## Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use snake_q::{
//!     adapters::MsgPackRepository,
//!     app::AgentConfig,
//!     q_learning::QLearningAgent,
//!     types::State,
//! };
//!
//! let config = AgentConfig::default()
//!     .with_learning_rate(0.1)
//!     .with_discount_factor(0.9)
//!     .with_epsilon(0.1);
//! let mut agent = QLearningAgent::new(config, Arc::new(MsgPackRepository::new()))?;
//!
//! let state = State::new(0, 0);
//! let action = agent.choose_action(&state);
//! agent.update(&state, action, 10.0, &state)?;
//! agent.close();
//! # Ok::<(), snake_q::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod snapshot;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use snapshot::{QTableSnapshot, SnapshotEntry, SnapshotFormat};
