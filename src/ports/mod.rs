//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the core and implemented by adapters and by the
//! environment.

pub mod environment;
pub mod observer;
pub mod repository;

pub use environment::{Environment, StepEvent, Transition};
pub use observer::Observer;
pub use repository::SnapshotRepository;
