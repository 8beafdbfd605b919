//! Training session pipeline
//!
//! This module provides:
//! - The tick loop connecting an agent to an environment
//! - The reward schedule and terminal handling
//! - Observers for progress display and metrics

pub mod observers;
pub mod session;

// Re-export observer implementations (adapters)
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver, SharedObserver};
pub use session::{SessionConfig, SessionResult, TerminalMode, TrainingSession};

pub use crate::ports::Observer;
