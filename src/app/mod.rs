//! Application wiring: agent configuration and the dependency container.

pub mod config;
pub mod container;

pub use config::{AgentConfig, DEFAULT_SNAPSHOT_PATH};
pub use container::{App, AppBuilder};
