//! Snake game with a tabular Q-learning agent
//!
//! This crate provides:
//! - A value table keyed by (head position, heading) with lazy zero defaults
//! - An epsilon-greedy policy and one-step temporal-difference learner
//! - Snapshot persistence (MessagePack or JSON) behind a repository port
//! - A headless Snake environment and a tick-driven training session

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod snake;
pub mod types;

pub use app::{AgentConfig, App};
pub use error::{Error, Result};
pub use q_learning::{QLearningAgent, QTable, QTableSnapshot, SnapshotFormat};
pub use types::{Heading, State, StateAction};
